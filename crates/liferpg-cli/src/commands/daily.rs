//! One-shot daily run: calendar file, then the phone push.
//!
//! Meant for cron or a CI schedule. A failed publish exits non-zero and is
//! not retried; re-run the command to try again.

use chrono::NaiveDate;
use clap::Args;
use liferpg_core::export_calendar;
use std::path::PathBuf;

use super::notify::send_summary;
use super::{resolve_date, ConfigSource};

#[derive(Args)]
pub struct DailyArgs {
    /// Day to export, YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Calendar output path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Skip writing the calendar file
    #[arg(long)]
    no_calendar: bool,
    /// Print the notification instead of sending it
    #[arg(long)]
    dry_run: bool,
}

pub fn run(args: DailyArgs, source: &ConfigSource) -> Result<(), Box<dyn std::error::Error>> {
    let config = source.load()?;
    let table = config.quest_table();
    table.validate()?;

    if !args.no_calendar {
        let path = match args.output {
            Some(path) => path,
            None => source.calendar_path(&config)?,
        };
        let written = export_calendar(
            &table,
            resolve_date(args.date),
            config.calendar.export_options(),
            &path,
        )?;
        println!("wrote {written} events to {}", path.display());
    }

    send_summary(&config, args.dry_run)
}
