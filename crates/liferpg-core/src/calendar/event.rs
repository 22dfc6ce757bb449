//! Calendar events derived from quest definitions.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::ValidationError;
use crate::quest::{QuestDefinition, QuestTable};

/// Default reminder lead time before each quest.
pub const DEFAULT_REMINDER_LEAD_MINUTES: u32 = 10;

/// Knobs for turning a quest table into events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub reminder_lead_minutes: u32,
    /// Emit `RRULE:FREQ=DAILY` so a single import covers every day.
    pub recurring: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            reminder_lead_minutes: DEFAULT_REMINDER_LEAD_MINUTES,
            recurring: true,
        }
    }
}

/// One calendar entry for one quest on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub uid: String,
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Offset from `start` at which the alarm fires (negative = before).
    #[serde(serialize_with = "serialize_minutes")]
    pub reminder_offset: Duration,
    pub recurring: bool,
}

fn serialize_minutes<S: serde::Serializer>(offset: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_i64(offset.num_minutes())
}

impl CalendarEvent {
    pub fn from_quest(
        quest: &QuestDefinition,
        date: NaiveDate,
        options: ExportOptions,
    ) -> Result<Self, ValidationError> {
        quest.validate()?;
        let start = date.and_time(quest.start_time()?);
        let end = start + Duration::minutes(i64::from(quest.duration_minutes));

        Ok(Self {
            uid: format!("{}-{}@liferpg", quest.id, date.format("%Y%m%d")),
            title: quest.display_title().to_string(),
            description: quest.label.clone(),
            start,
            end,
            reminder_offset: -Duration::minutes(i64::from(options.reminder_lead_minutes)),
            recurring: options.recurring,
        })
    }

    /// Wall-clock time at which the reminder fires.
    pub fn reminder_at(&self) -> NaiveDateTime {
        self.start + self.reminder_offset
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Build one event per quest, in table order.
///
/// The whole table is validated first so nothing is produced from a table
/// with an invalid entry.
pub fn events_for_day(
    table: &QuestTable,
    date: NaiveDate,
    options: ExportOptions,
) -> Result<Vec<CalendarEvent>, ValidationError> {
    table.validate()?;
    table
        .iter()
        .map(|quest| CalendarEvent::from_quest(quest, date, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn event_spans_quest_duration_with_ten_minute_reminder() {
        let quest = QuestDefinition::new("roadwork", 16, 30, 45).with_title("Roadwork");
        let event = CalendarEvent::from_quest(&quest, day(), ExportOptions::default()).unwrap();

        assert_eq!(event.start, day().and_hms_opt(16, 30, 0).unwrap());
        assert_eq!(event.end, day().and_hms_opt(17, 15, 0).unwrap());
        assert_eq!(event.duration(), Duration::minutes(45));
        assert_eq!(event.reminder_offset, Duration::minutes(-10));
        assert_eq!(event.reminder_at(), day().and_hms_opt(16, 20, 0).unwrap());
        assert_eq!(event.uid, "roadwork-20261019@liferpg");
        assert_eq!(event.title, "Roadwork");
    }

    #[test]
    fn event_crossing_midnight_ends_next_day() {
        let quest = QuestDefinition::new("sleep", 23, 30, 480);
        let event = CalendarEvent::from_quest(&quest, day(), ExportOptions::default()).unwrap();

        let next = day().succ_opt().unwrap();
        assert_eq!(event.end, next.and_time(NaiveTime::from_hms_opt(7, 30, 0).unwrap()));
    }

    #[test]
    fn reminder_lead_is_configurable() {
        let quest = QuestDefinition::new("study", 20, 0, 30);
        let options = ExportOptions {
            reminder_lead_minutes: 25,
            recurring: false,
        };
        let event = CalendarEvent::from_quest(&quest, day(), options).unwrap();
        assert_eq!(event.reminder_at(), day().and_hms_opt(19, 35, 0).unwrap());
        assert!(!event.recurring);
    }

    #[test]
    fn events_for_day_rejects_invalid_table() {
        let table = QuestTable::new(vec![
            QuestDefinition::new("roadwork", 16, 30, 45),
            QuestDefinition::new("study", 20, 75, 30),
        ]);
        let err = events_for_day(&table, day(), ExportOptions::default()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTime { minute: 75, .. }));
    }

    #[test]
    fn events_for_day_keeps_table_order() {
        let table = QuestTable::default_daily();
        let events = events_for_day(&table, day(), ExportOptions::default()).unwrap();
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Roadwork", "Jump Rope", "Study"]);
    }

    #[test]
    fn empty_table_yields_no_events() {
        let events =
            events_for_day(&QuestTable::default(), day(), ExportOptions::default()).unwrap();
        assert!(events.is_empty());
    }
}
