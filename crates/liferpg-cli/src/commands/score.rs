use chrono::{Datelike, NaiveDate};
use clap::Args;
use liferpg_core::progression::{score_day, Completion, LevelSummary};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{resolve_date, ConfigSource};

#[derive(Args)]
pub struct ScoreArgs {
    /// JSON array of completions ("-" for stdin)
    file: PathBuf,
    /// Day being scored, YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct LevelArgs {
    /// Lifetime XP earned
    xp: u64,
    /// Lifetime penalties
    #[arg(long, default_value_t = 0)]
    penalty: u64,
}

fn read_input(file: &Path) -> Result<String, Box<dyn std::error::Error>> {
    if file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}

pub fn run(args: ScoreArgs, source: &ConfigSource) -> Result<(), Box<dyn std::error::Error>> {
    let config = source.load()?;
    let table = config.quest_table();
    table.validate()?;

    let completions: Vec<Completion> = serde_json::from_str(&read_input(&args.file)?)?;
    let date = resolve_date(args.date);
    let report = score_day(&table, &completions, date.weekday())?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn run_level(args: LevelArgs) -> Result<(), Box<dyn std::error::Error>> {
    let summary = LevelSummary::from_totals(args.xp, args.penalty);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
