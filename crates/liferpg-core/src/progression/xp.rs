//! XP curve and multipliers.

use serde::{Deserialize, Serialize};

/// Streak days that still raise the multiplier.
pub const STREAK_CAP_DAYS: u32 = 5;

/// Multiplier gained per streak day.
pub const STREAK_STEP: f64 = 0.10;

/// How hard the user pushed on a completed quest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Easy,
    #[default]
    Standard,
    Hard,
    Max,
}

impl Intensity {
    pub fn multiplier(&self) -> f64 {
        match self {
            Intensity::Easy => 0.8,
            Intensity::Standard => 1.0,
            Intensity::Hard => 1.25,
            Intensity::Max => 1.5,
        }
    }
}

impl std::str::FromStr for Intensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Intensity::Easy),
            "standard" => Ok(Intensity::Standard),
            "hard" => Ok(Intensity::Hard),
            "max" => Ok(Intensity::Max),
            other => Err(format!("unknown intensity '{other}'")),
        }
    }
}

/// Total XP needed to reach `level`. Saturates at `u64::MAX`.
pub fn xp_for_level(level: u32) -> u64 {
    u64::try_from(threshold(level)).unwrap_or(u64::MAX)
}

fn threshold(level: u32) -> u128 {
    100 * u128::from(level) * u128::from(level)
}

/// Level reached with `xp` total XP. Negative XP counts as zero.
pub fn level_for_xp(xp: i64) -> u32 {
    level_for_total(u64::try_from(xp).unwrap_or(0))
}

fn level_for_total(xp: u64) -> u32 {
    let xp_wide = u128::from(xp);
    let mut level = (xp as f64 / 100.0).sqrt() as u32;
    // f64 loses precision on large totals; settle on the exact level.
    while level > 0 && threshold(level) > xp_wide {
        level -= 1;
    }
    while threshold(level + 1) <= xp_wide {
        level += 1;
    }
    level
}

/// `1.0 + 0.1 * min(days, 5)`.
pub fn streak_multiplier(streak_days: u32) -> f64 {
    1.0 + STREAK_STEP * f64::from(streak_days.min(STREAK_CAP_DAYS))
}

/// Reward for time spent beyond a quest's baseline: +1 per extra hour.
pub fn duration_multiplier(minutes: u32, baseline_minutes: u32) -> f64 {
    1.0 + f64::from(minutes.saturating_sub(baseline_minutes)) / 60.0
}

/// Overall standing after subtracting lifetime penalties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    pub net_xp: u64,
    pub level: u32,
    pub xp_to_next: u64,
}

impl LevelSummary {
    pub fn from_totals(total_xp: u64, total_penalty: u64) -> Self {
        let net_xp = total_xp.saturating_sub(total_penalty);
        let level = level_for_total(net_xp);
        let remaining = threshold(level + 1) - u128::from(net_xp);
        Self {
            net_xp,
            level,
            xp_to_next: u64::try_from(remaining).unwrap_or(u64::MAX),
        }
    }
}
