//! Calendar export command.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use liferpg_core::calendar::{events_for_day, render_calendar};
use liferpg_core::export_calendar;
use std::path::PathBuf;

use super::{resolve_date, ConfigSource};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Write the quest calendar (.ics) for import on a phone
    Export {
        /// Output file path (default: calendar.output or <data dir>/quests.ics)
        #[arg(long)]
        output: Option<PathBuf>,
        /// First day of the schedule, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// One-off events instead of daily recurring ones
        #[arg(long)]
        no_repeat: bool,
    },
    /// Print the calendar to stdout instead of writing a file
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub fn run(action: CalendarAction, source: &ConfigSource) -> Result<(), Box<dyn std::error::Error>> {
    let config = source.load()?;
    let table = config.quest_table();
    let mut options = config.calendar.export_options();

    match action {
        CalendarAction::Export {
            output,
            date,
            no_repeat,
        } => {
            if no_repeat {
                options.recurring = false;
            }
            let path = match output {
                Some(path) => path,
                None => source.calendar_path(&config)?,
            };
            let written = export_calendar(&table, resolve_date(date), options, &path)?;
            println!("wrote {written} events to {}", path.display());
        }
        CalendarAction::Show { date } => {
            let events = events_for_day(&table, resolve_date(date), options)?;
            print!("{}", render_calendar(&events, Utc::now()));
        }
    }
    Ok(())
}
