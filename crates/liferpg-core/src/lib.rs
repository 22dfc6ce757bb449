//! # Life RPG Core Library
//!
//! Business logic for the Life RPG quest tracker. The `liferpg` CLI is a
//! thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Quests**: an ordered table of recurring quests pinned to wall-clock
//!   slots
//! - **Calendar**: turns the table into an iCalendar file with a reminder
//!   ahead of each quest
//! - **Notify**: formats a one-line daily summary and publishes it to an
//!   ntfy topic
//! - **Progression**: XP curve, streak and penalty rules
//! - **Storage**: TOML configuration in the data directory
//!
//! ## Key Components
//!
//! - [`QuestTable`]: the daily quest schedule
//! - [`export_calendar`]: writes the `.ics` file
//! - [`NtfyPublisher`]: relay client behind the [`Publisher`] trait
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod error;
pub mod notify;
pub mod progression;
pub mod quest;
pub mod setup;
pub mod storage;

pub use calendar::{export_calendar, CalendarEvent, ExportOptions};
pub use error::{ConfigError, CoreError, NotifyError, ValidationError};
pub use notify::{
    publish_daily, summary_body, NotificationMessage, NtfyPublisher, PublishOutcome, Publisher,
};
pub use progression::{score_day, Completion, DayReport, Intensity, LevelSummary};
pub use quest::{Achievement, QuestDefinition, QuestRewards, QuestTable};
pub use storage::Config;
