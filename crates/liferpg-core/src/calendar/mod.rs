//! Calendar export: quest table to an importable `.ics` file.

pub mod event;
pub mod ics;

pub use event::{events_for_day, CalendarEvent, ExportOptions, DEFAULT_REMINDER_LEAD_MINUTES};
pub use ics::render_calendar;

use chrono::{NaiveDate, Utc};
use std::path::Path;

use crate::error::Result;
use crate::quest::QuestTable;

/// Write the day's calendar to `path` and return the number of events.
///
/// Invalid quest times are rejected before anything touches the disk. An
/// empty table still produces a valid, event-less calendar.
pub fn export_calendar(
    table: &QuestTable,
    date: NaiveDate,
    options: ExportOptions,
    path: &Path,
) -> Result<usize> {
    let events = events_for_day(table, date, options)?;
    let ics = render_calendar(&events, Utc::now());
    tracing::debug!(bytes = ics.len(), "rendered calendar");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, ics)?;

    tracing::info!(events = events.len(), path = %path.display(), "calendar exported");
    Ok(events.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use crate::quest::QuestDefinition;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn export_writes_file_into_nested_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("quests.ics");

        let written = export_calendar(
            &QuestTable::default_daily(),
            day(),
            ExportOptions::default(),
            &path,
        )
        .unwrap();

        assert_eq!(written, 3);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("BEGIN:VEVENT").count(), 3);
    }

    #[test]
    fn export_rejects_invalid_time_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quests.ics");
        let table = QuestTable::new(vec![QuestDefinition::new("study", 20, 75, 30)]);

        let err = export_calendar(&table, day(), ExportOptions::default(), &path).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidTime { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn export_of_empty_table_writes_zero_events() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quests.ics");

        let written =
            export_calendar(&QuestTable::default(), day(), ExportOptions::default(), &path)
                .unwrap();

        assert_eq!(written, 0);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("BEGIN:VCALENDAR"));
        assert!(!content.contains("BEGIN:VEVENT"));
    }
}
