//! Quest definitions and the daily quest table.
//!
//! A quest is a recurring personal task pinned to a wall-clock slot. The
//! table is ordered; that order drives the calendar file, the notification
//! body and day scoring alike.

mod defaults;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ValidationError;

/// Longest duration a single quest may span.
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// An optional extra the user can claim when completing a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub code: String,
    pub xp: u32,
    #[serde(default)]
    pub description: String,
}

/// XP granted once a measured run (e.g. straight drives) reaches `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub threshold: u32,
    pub xp: u32,
}

/// XP and penalty rules attached to a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestRewards {
    /// 1 is the most important tier.
    #[serde(default = "default_tier")]
    pub tier: u8,
    /// Required quests left undone at day end incur `penalty`.
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(default)]
    pub base_xp: u32,
    #[serde(default)]
    pub penalty: u32,
    /// Minutes after which extra time starts to count.
    #[serde(default = "default_baseline_minutes")]
    pub baseline_minutes: u32,
    /// Flat XP per minute beyond the baseline.
    #[serde(default)]
    pub per_minute_bonus: u32,
    #[serde(default)]
    pub bonuses: Vec<Bonus>,
    /// Every achievement whose threshold is met stacks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<Achievement>,
    /// Streak bucket; defaults to the quest id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streak_key: Option<String>,
    /// Days on which the quest earns base XP. `None` means every day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_days: Option<Vec<Weekday>>,
}

fn default_tier() -> u8 {
    4
}

fn default_baseline_minutes() -> u32 {
    30
}

impl Default for QuestRewards {
    fn default() -> Self {
        Self {
            tier: default_tier(),
            required: false,
            skill: None,
            base_xp: 0,
            penalty: 0,
            baseline_minutes: default_baseline_minutes(),
            per_minute_bonus: 0,
            bonuses: Vec::new(),
            achievements: Vec::new(),
            streak_key: None,
            scheduled_days: None,
        }
    }
}

impl QuestRewards {
    pub fn bonus(&self, code: &str) -> Option<&Bonus> {
        self.bonuses.iter().find(|b| b.code == code)
    }

    /// Summed XP of the achievements a run of `achieved` unlocks.
    pub fn achievement_xp(&self, achieved: u32) -> u64 {
        self.achievements
            .iter()
            .filter(|a| achieved >= a.threshold)
            .map(|a| u64::from(a.xp))
            .sum()
    }

    pub fn is_scheduled_on(&self, weekday: Weekday) -> bool {
        self.scheduled_days
            .as_ref()
            .map_or(true, |days| days.contains(&weekday))
    }
}

/// One recurring quest in the daily table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDefinition {
    pub id: String,
    pub hour: u32,
    pub minute: u32,
    pub duration_minutes: u32,
    /// Calendar summary. Falls back to the id when empty.
    #[serde(default)]
    pub title: String,
    /// Short notification text such as `Run 4mi`.
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub rewards: QuestRewards,
}

impl QuestDefinition {
    pub fn new(id: impl Into<String>, hour: u32, minute: u32, duration_minutes: u32) -> Self {
        Self {
            id: id.into(),
            hour,
            minute,
            duration_minutes,
            title: String::new(),
            label: String::new(),
            rewards: QuestRewards::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_rewards(mut self, rewards: QuestRewards) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    pub fn streak_key(&self) -> &str {
        self.rewards.streak_key.as_deref().unwrap_or(&self.id)
    }

    /// Wall-clock start of the quest.
    pub fn start_time(&self) -> Result<NaiveTime, ValidationError> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).ok_or_else(|| {
            ValidationError::InvalidTime {
                id: self.id.clone(),
                hour: self.hour,
                minute: self.minute,
            }
        })
    }

    /// Check the time slot and duration of a single quest.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.start_time()?;
        if self.duration_minutes == 0 || self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(ValidationError::InvalidDuration {
                id: self.id.clone(),
                minutes: self.duration_minutes,
            });
        }
        Ok(())
    }

    /// `<clock> <label>` as it appears in the daily notification.
    ///
    /// Quests without a label render as `<clock> <title> <duration>'`.
    pub fn summary_fragment(&self) -> String {
        let clock = format_clock(self.hour, self.minute);
        if self.label.is_empty() {
            format!("{clock} {} {}'", self.display_title(), self.duration_minutes)
        } else {
            format!("{clock} {}", self.label)
        }
    }
}

/// Format a 24h time as a compact 12h clock: `4:30p`, `12:05a`.
pub fn format_clock(hour: u32, minute: u32) -> String {
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    let suffix = if hour < 12 { 'a' } else { 'p' };
    format!("{h12}:{minute:02}{suffix}")
}

/// Ordered collection of quest definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestTable {
    quests: Vec<QuestDefinition>,
}

impl QuestTable {
    pub fn new(quests: Vec<QuestDefinition>) -> Self {
        Self { quests }
    }

    /// The built-in daily table used when the config has none.
    pub fn default_daily() -> Self {
        defaults::daily()
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuestDefinition> {
        self.quests.iter()
    }

    pub fn get(&self, id: &str) -> Option<&QuestDefinition> {
        self.quests.iter().find(|q| q.id == id)
    }

    /// Validate every quest and the uniqueness of ids.
    ///
    /// Fails on the first problem found, in table order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for (index, quest) in self.quests.iter().enumerate() {
            if quest.id.trim().is_empty() {
                return Err(ValidationError::EmptyId { index });
            }
            if !seen.insert(quest.id.as_str()) {
                return Err(ValidationError::DuplicateId(quest.id.clone()));
            }
            quest.validate()?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a QuestTable {
    type Item = &'a QuestDefinition;
    type IntoIter = std::slice::Iter<'a, QuestDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.quests.iter()
    }
}

impl From<Vec<QuestDefinition>> for QuestTable {
    fn from(quests: Vec<QuestDefinition>) -> Self {
        Self::new(quests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_clock_uses_compact_twelve_hour_form() {
        assert_eq!(format_clock(16, 30), "4:30p");
        assert_eq!(format_clock(18, 10), "6:10p");
        assert_eq!(format_clock(0, 5), "12:05a");
        assert_eq!(format_clock(12, 0), "12:00p");
        assert_eq!(format_clock(9, 0), "9:00a");
        assert_eq!(format_clock(23, 59), "11:59p");
    }

    #[test]
    fn summary_fragment_prefers_label() {
        let quest = QuestDefinition::new("roadwork", 16, 30, 45).with_label("Run 4mi");
        assert_eq!(quest.summary_fragment(), "4:30p Run 4mi");
    }

    #[test]
    fn summary_fragment_falls_back_to_title_and_duration() {
        let quest = QuestDefinition::new("piano", 21, 0, 20).with_title("Piano");
        assert_eq!(quest.summary_fragment(), "9:00p Piano 20'");

        let untitled = QuestDefinition::new("piano", 21, 0, 20);
        assert_eq!(untitled.summary_fragment(), "9:00p piano 20'");
    }

    #[test]
    fn validate_rejects_bad_minute() {
        let table = QuestTable::new(vec![QuestDefinition::new("study", 20, 75, 30)]);
        assert_eq!(
            table.validate(),
            Err(ValidationError::InvalidTime {
                id: "study".into(),
                hour: 20,
                minute: 75
            })
        );
    }

    #[test]
    fn validate_rejects_bad_hour() {
        let table = QuestTable::new(vec![QuestDefinition::new("late", 24, 0, 10)]);
        assert!(matches!(
            table.validate(),
            Err(ValidationError::InvalidTime { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_and_oversized_duration() {
        let zero = QuestTable::new(vec![QuestDefinition::new("nap", 13, 0, 0)]);
        assert!(matches!(
            zero.validate(),
            Err(ValidationError::InvalidDuration { minutes: 0, .. })
        ));

        let long = QuestTable::new(vec![QuestDefinition::new("nap", 13, 0, 1441)]);
        assert!(matches!(
            long.validate(),
            Err(ValidationError::InvalidDuration { minutes: 1441, .. })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_and_empty_ids() {
        let dup = QuestTable::new(vec![
            QuestDefinition::new("study", 20, 0, 30),
            QuestDefinition::new("study", 21, 0, 30),
        ]);
        assert_eq!(
            dup.validate(),
            Err(ValidationError::DuplicateId("study".into()))
        );

        let empty = QuestTable::new(vec![QuestDefinition::new("  ", 20, 0, 30)]);
        assert_eq!(empty.validate(), Err(ValidationError::EmptyId { index: 0 }));
    }

    #[test]
    fn empty_table_is_valid() {
        assert!(QuestTable::default().validate().is_ok());
    }

    #[test]
    fn default_daily_table_is_valid_and_ordered() {
        let table = QuestTable::default_daily();
        table.validate().unwrap();
        let ids: Vec<&str> = table.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["roadwork", "jumprope", "study"]);
    }

    #[test]
    fn streak_key_defaults_to_id() {
        let quest = QuestDefinition::new("piano", 21, 0, 20);
        assert_eq!(quest.streak_key(), "piano");

        let keyed = QuestDefinition::new("piano", 21, 0, 20).with_rewards(QuestRewards {
            streak_key: Some("piano_daily".into()),
            ..QuestRewards::default()
        });
        assert_eq!(keyed.streak_key(), "piano_daily");
    }

    #[test]
    fn scheduled_days_limit_base_xp_days() {
        let rewards = QuestRewards {
            scheduled_days: Some(vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]),
            ..QuestRewards::default()
        };
        assert!(rewards.is_scheduled_on(Weekday::Wed));
        assert!(!rewards.is_scheduled_on(Weekday::Tue));
        assert!(QuestRewards::default().is_scheduled_on(Weekday::Sun));
    }

    #[test]
    fn quest_table_parses_from_toml_array() {
        #[derive(Deserialize)]
        struct Wrapper {
            quests: QuestTable,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
            [[quests]]
            id = "study"
            hour = 20
            minute = 0
            duration_minutes = 30
            label = "Study 30'"

            [quests.rewards]
            required = true
            base_xp = 50
            "#,
        )
        .unwrap();

        let study = parsed.quests.get("study").unwrap();
        assert_eq!(study.label, "Study 30'");
        assert!(study.rewards.required);
        assert_eq!(study.rewards.base_xp, 50);
        assert_eq!(study.rewards.baseline_minutes, 30);
        assert_eq!(study.rewards.tier, 4);
    }

    #[test]
    fn achievements_stack_up_to_the_run_reached() {
        let rewards = QuestRewards {
            achievements: vec![
                Achievement { threshold: 100, xp: 25 },
                Achievement { threshold: 150, xp: 50 },
                Achievement { threshold: 200, xp: 100 },
            ],
            ..QuestRewards::default()
        };
        assert_eq!(rewards.achievement_xp(99), 0);
        assert_eq!(rewards.achievement_xp(150), 75);
        assert_eq!(rewards.achievement_xp(400), 175);
    }
}
