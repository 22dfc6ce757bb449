//! XP, levels, streaks and penalties.
//!
//! Everything here is a pure function of its inputs; nothing is persisted
//! between runs.

pub mod day;
pub mod streak;
pub mod xp;

pub use day::{
    score_day, skill_levels, Completion, DayReport, QuestScore, SkillLevel, MAX_COMPLETION_MINUTES,
};
pub use streak::next_streak;
pub use xp::{
    duration_multiplier, level_for_xp, streak_multiplier, xp_for_level, Intensity, LevelSummary,
};
