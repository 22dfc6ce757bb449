use clap::Subcommand;
use liferpg_core::quest::format_clock;

use super::ConfigSource;

#[derive(Subcommand)]
pub enum QuestAction {
    /// List quests in table order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the quest table
    Check,
}

pub fn run(action: QuestAction, source: &ConfigSource) -> Result<(), Box<dyn std::error::Error>> {
    let config = source.load()?;
    let table = config.quest_table();

    match action {
        QuestAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
                return Ok(());
            }
            if table.is_empty() {
                println!("No quests configured.");
                return Ok(());
            }
            for quest in &table {
                let required = if quest.rewards.required { "*" } else { " " };
                println!(
                    "{required} T{} {:>6}  {:>4}m  {:<12} {}",
                    quest.rewards.tier,
                    format_clock(quest.hour, quest.minute),
                    quest.duration_minutes,
                    quest.id,
                    quest.display_title(),
                );
            }
        }
        QuestAction::Check => {
            table.validate()?;
            println!("ok: {} quests", table.len());
        }
    }
    Ok(())
}
