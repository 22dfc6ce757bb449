//! Scoring one day's quest board.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::xp::{duration_multiplier, level_for_xp, streak_multiplier, Intensity};
use crate::error::ValidationError;
use crate::quest::{QuestDefinition, QuestTable};

/// Longest session a single completion may report.
pub const MAX_COMPLETION_MINUTES: u32 = 240;

/// What the user reports for one quest on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub quest_id: String,
    #[serde(default = "default_true")]
    pub done: bool,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub intensity: Intensity,
    /// Bonus codes claimed, e.g. `combo`.
    #[serde(default)]
    pub bonuses: Vec<String>,
    /// Current streak for the quest's streak key before today.
    #[serde(default)]
    pub streak_days: u32,
    /// Best measured run today, checked against the quest's achievements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl Completion {
    pub fn done(quest_id: impl Into<String>, minutes: u32) -> Self {
        Self {
            quest_id: quest_id.into(),
            done: true,
            minutes,
            intensity: Intensity::Standard,
            bonuses: Vec::new(),
            streak_days: 0,
            achieved: None,
        }
    }
}

/// Outcome for a single quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestScore {
    pub quest_id: String,
    pub streak_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    pub done: bool,
    /// False when the quest has scheduled days and today is not one.
    pub scheduled: bool,
    pub xp: u64,
    pub penalty: u32,
}

/// Result of scoring a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub scores: Vec<QuestScore>,
    pub total_xp: u64,
    /// Sum of penalties for required quests left undone.
    pub pending_penalty: u64,
    /// XP earned today per skill. Quests without a skill are not counted.
    pub skill_xp: BTreeMap<String, u64>,
}

/// A skill's standing on the shared XP curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillLevel {
    pub skill: String,
    pub xp: u64,
    pub level: u32,
}

/// Levels for per-skill XP totals, highest XP first.
pub fn skill_levels(totals: &BTreeMap<String, u64>) -> Vec<SkillLevel> {
    let mut levels: Vec<SkillLevel> = totals
        .iter()
        .map(|(skill, &xp)| SkillLevel {
            skill: skill.clone(),
            xp,
            level: level_for_xp(i64::try_from(xp).unwrap_or(i64::MAX)),
        })
        .collect();
    levels.sort_by(|a, b| b.xp.cmp(&a.xp).then_with(|| a.skill.cmp(&b.skill)));
    levels
}

impl DayReport {
    /// Streak keys that should be extended today.
    pub fn completed_streak_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for score in self.scores.iter().filter(|s| s.done) {
            if !keys.contains(&score.streak_key.as_str()) {
                keys.push(&score.streak_key);
            }
        }
        keys
    }

    pub fn net_xp(&self) -> i64 {
        let gained = i64::try_from(self.total_xp).unwrap_or(i64::MAX);
        let lost = i64::try_from(self.pending_penalty).unwrap_or(i64::MAX);
        gained.saturating_sub(lost)
    }

    pub fn skill_levels(&self) -> Vec<SkillLevel> {
        skill_levels(&self.skill_xp)
    }
}

/// Score `completions` against `table` for a day falling on `weekday`.
///
/// Quests without a completion count as not done. Completions for unknown
/// quests, repeated quests, unknown bonus codes, or more than
/// [`MAX_COMPLETION_MINUTES`] are rejected.
pub fn score_day(
    table: &QuestTable,
    completions: &[Completion],
    weekday: Weekday,
) -> Result<DayReport, ValidationError> {
    let mut by_id: HashMap<&str, &Completion> = HashMap::new();
    for completion in completions {
        if table.get(&completion.quest_id).is_none() {
            return Err(ValidationError::UnknownQuest(completion.quest_id.clone()));
        }
        if by_id.insert(&completion.quest_id, completion).is_some() {
            return Err(ValidationError::InvalidValue {
                field: "quest_id".into(),
                message: format!("'{}' reported more than once", completion.quest_id),
            });
        }
    }

    let mut scores = Vec::with_capacity(table.len());
    for quest in table {
        let completion = by_id.get(quest.id.as_str()).copied().filter(|c| c.done);
        scores.push(score_quest(quest, completion, weekday)?);
    }

    let total_xp = scores.iter().fold(0u64, |acc, s| acc.saturating_add(s.xp));
    let pending_penalty = scores
        .iter()
        .fold(0u64, |acc, s| acc.saturating_add(u64::from(s.penalty)));
    let mut skill_xp: BTreeMap<String, u64> = BTreeMap::new();
    for score in scores.iter().filter(|s| s.done) {
        if let Some(skill) = &score.skill {
            let entry = skill_xp.entry(skill.clone()).or_default();
            *entry = entry.saturating_add(score.xp);
        }
    }
    tracing::debug!(total_xp, pending_penalty, skills = skill_xp.len(), "day scored");

    Ok(DayReport {
        scores,
        total_xp,
        pending_penalty,
        skill_xp,
    })
}

fn score_quest(
    quest: &QuestDefinition,
    completion: Option<&Completion>,
    weekday: Weekday,
) -> Result<QuestScore, ValidationError> {
    let rewards = &quest.rewards;
    let scheduled = rewards.is_scheduled_on(weekday);
    let mut score = QuestScore {
        quest_id: quest.id.clone(),
        streak_key: quest.streak_key().to_string(),
        skill: rewards.skill.clone(),
        done: completion.is_some(),
        scheduled,
        xp: 0,
        penalty: 0,
    };

    let Some(completion) = completion else {
        if rewards.required {
            score.penalty = rewards.penalty;
        }
        return Ok(score);
    };

    if completion.minutes > MAX_COMPLETION_MINUTES {
        return Err(ValidationError::InvalidValue {
            field: "minutes".into(),
            message: format!(
                "'{}' reports {} minutes, limit is {MAX_COMPLETION_MINUTES}",
                quest.id, completion.minutes
            ),
        });
    }

    // Off-schedule completions still earn bonuses.
    let base = if scheduled { u64::from(rewards.base_xp) } else { 0 };
    let extra_minutes = completion.minutes.saturating_sub(rewards.baseline_minutes);
    let mut bonus = u64::from(rewards.per_minute_bonus).saturating_mul(u64::from(extra_minutes));
    for code in &completion.bonuses {
        let claimed = rewards
            .bonus(code)
            .ok_or_else(|| ValidationError::UnknownBonus {
                quest: quest.id.clone(),
                code: code.clone(),
            })?;
        bonus = bonus.saturating_add(u64::from(claimed.xp));
    }
    if let Some(achieved) = completion.achieved {
        bonus = bonus.saturating_add(rewards.achievement_xp(achieved));
    }

    let gain = base.saturating_add(bonus) as f64
        * completion.intensity.multiplier()
        * streak_multiplier(completion.streak_days)
        * duration_multiplier(completion.minutes, rewards.baseline_minutes);
    // `as` saturates out-of-range floats.
    score.xp = gain.round() as u64;
    Ok(score)
}
