//! iCalendar (RFC 5545) serialization.
//!
//! Times are written as floating local times so phone calendars place each
//! quest at the same wall-clock slot regardless of the device's zone.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use super::event::CalendarEvent;

pub const PRODID: &str = "-//liferpg//Daily Quests//EN";

/// RFC 5545 limit on content line length, in octets.
const MAX_LINE_OCTETS: usize = 75;

/// Render a complete VCALENDAR document.
///
/// `stamp` becomes every event's DTSTAMP; passing it in keeps output
/// deterministic for a given input.
pub fn render_calendar(events: &[CalendarEvent], stamp: DateTime<Utc>) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ];

    for event in events {
        push_event(&mut lines, event, stamp);
    }
    lines.push("END:VCALENDAR".to_string());

    let mut out = String::new();
    for line in &lines {
        out.push_str(&fold_line(line));
        out.push_str("\r\n");
    }
    out
}

fn push_event(lines: &mut Vec<String>, event: &CalendarEvent, stamp: DateTime<Utc>) {
    lines.push("BEGIN:VEVENT".to_string());
    lines.push(format!("UID:{}", event.uid));
    lines.push(format!("DTSTAMP:{}", format_utc(stamp)));
    lines.push(format!("SUMMARY:{}", escape_text(&event.title)));
    if !event.description.is_empty() {
        lines.push(format!("DESCRIPTION:{}", escape_text(&event.description)));
    }
    lines.push(format!("DTSTART:{}", format_local(event.start)));
    lines.push(format!("DTEND:{}", format_local(event.end)));
    if event.recurring {
        lines.push("RRULE:FREQ=DAILY".to_string());
    }
    lines.push("BEGIN:VALARM".to_string());
    lines.push("ACTION:DISPLAY".to_string());
    lines.push(format!("DESCRIPTION:{}", escape_text(&event.title)));
    lines.push(format!("TRIGGER:{}", format_trigger(event.reminder_offset)));
    lines.push("END:VALARM".to_string());
    lines.push("END:VEVENT".to_string());
}

pub fn format_local(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

pub fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Relative alarm trigger such as `-PT10M`.
pub fn format_trigger(offset: Duration) -> String {
    let minutes = offset.num_minutes();
    if minutes < 0 {
        format!("-PT{}M", -minutes)
    } else {
        format!("PT{minutes}M")
    }
}

/// Escape a TEXT value.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

/// Fold a content line at 75 octets without splitting a UTF-8 character.
///
/// Continuation lines start with a single space, which counts toward
/// their own 75-octet budget.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut used = 0;
    let mut budget = MAX_LINE_OCTETS;
    for c in line.chars() {
        let width = c.len_utf8();
        if used + width > budget {
            out.push_str("\r\n ");
            used = 0;
            budget = MAX_LINE_OCTETS - 1;
        }
        out.push(c);
        used += width;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::event::{events_for_day, ExportOptions};
    use crate::quest::{QuestDefinition, QuestTable};
    use chrono::{NaiveDate, TimeZone};

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 6, 0, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn renders_event_with_alarm() {
        let table = QuestTable::new(vec![QuestDefinition::new("roadwork", 16, 30, 45)
            .with_title("Roadwork")
            .with_label("Run 4mi")]);
        let events = events_for_day(&table, day(), ExportOptions::default()).unwrap();
        let ics = render_calendar(&events, stamp());

        let expected = [
            "BEGIN:VCALENDAR",
            "VERSION:2.0",
            "PRODID:-//liferpg//Daily Quests//EN",
            "CALSCALE:GREGORIAN",
            "METHOD:PUBLISH",
            "BEGIN:VEVENT",
            "UID:roadwork-20261019@liferpg",
            "DTSTAMP:20261019T060000Z",
            "SUMMARY:Roadwork",
            "DESCRIPTION:Run 4mi",
            "DTSTART:20261019T163000",
            "DTEND:20261019T171500",
            "RRULE:FREQ=DAILY",
            "BEGIN:VALARM",
            "ACTION:DISPLAY",
            "DESCRIPTION:Roadwork",
            "TRIGGER:-PT10M",
            "END:VALARM",
            "END:VEVENT",
            "END:VCALENDAR",
            "",
        ]
        .join("\r\n");
        assert_eq!(ics, expected);
    }

    #[test]
    fn empty_calendar_is_still_a_calendar() {
        let ics = render_calendar(&[], stamp());
        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn non_recurring_events_omit_rrule() {
        let table = QuestTable::new(vec![QuestDefinition::new("study", 20, 0, 30)]);
        let options = ExportOptions {
            recurring: false,
            ..ExportOptions::default()
        };
        let events = events_for_day(&table, day(), options).unwrap();
        assert!(!render_calendar(&events, stamp()).contains("RRULE"));
    }

    #[test]
    fn escape_text_handles_reserved_characters() {
        assert_eq!(escape_text("Rope 10'"), "Rope 10'");
        assert_eq!(escape_text("a,b;c\\d"), "a\\,b\\;c\\\\d");
        assert_eq!(escape_text("line1\r\nline2"), "line1\\nline2");
    }

    #[test]
    fn format_trigger_signs() {
        assert_eq!(format_trigger(Duration::minutes(-10)), "-PT10M");
        assert_eq!(format_trigger(Duration::minutes(0)), "PT0M");
        assert_eq!(format_trigger(Duration::minutes(5)), "PT5M");
    }

    #[test]
    fn fold_line_keeps_short_lines() {
        assert_eq!(fold_line("SUMMARY:Study"), "SUMMARY:Study");
    }

    #[test]
    fn fold_line_splits_long_lines_within_octet_budget() {
        let line = format!("SUMMARY:{}", "é".repeat(60));
        let folded = fold_line(&line);

        for (i, segment) in folded.split("\r\n").enumerate() {
            assert!(segment.len() <= MAX_LINE_OCTETS, "segment {i} too long");
            if i > 0 {
                assert!(segment.starts_with(' '));
            }
        }
        let unfolded = folded.replace("\r\n ", "");
        assert_eq!(unfolded, line);
    }
}
