//! Notification commands.

use clap::Subcommand;
use liferpg_core::notify::{
    publish_daily, NotificationMessage, NtfyPublisher, PublishOutcome, PublishReceipt, Publisher,
};
use liferpg_core::{Config, NotifyError};

use super::ConfigSource;

#[derive(Subcommand)]
pub enum NotifyAction {
    /// Publish today's summary to the configured topic
    Send {
        /// Override the topic for this send
        #[arg(long)]
        topic: Option<String>,
        /// Print the message instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the message that would be sent
    Preview {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Prints instead of publishing.
pub struct DryRunPublisher;

impl Publisher for DryRunPublisher {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn publish(&self, message: &NotificationMessage) -> Result<PublishReceipt, NotifyError> {
        println!("[dry run] topic: {}", message.topic);
        println!("[dry run] title: {}", message.title);
        println!("[dry run] body:  {}", message.body);
        Ok(PublishReceipt {
            status: 200,
            message_id: None,
        })
    }
}

pub fn run(action: NotifyAction, source: &ConfigSource) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = source.load()?;

    match action {
        NotifyAction::Send { topic, dry_run } => {
            if let Some(topic) = topic {
                config.notify.topic = topic;
            }
            send_summary(&config, dry_run)?;
        }
        NotifyAction::Preview { json } => {
            let message = NotificationMessage::daily(&config.quest_table(), &config.notify);
            if json {
                println!("{}", serde_json::to_string_pretty(&message)?);
            } else {
                println!("{}", message.body);
            }
        }
    }
    Ok(())
}

/// Build and send the daily summary once, reporting the outcome.
pub fn send_summary(config: &Config, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    let table = config.quest_table();
    table.validate()?;
    let message = NotificationMessage::daily(&table, &config.notify);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = if dry_run {
        runtime.block_on(publish_daily(&DryRunPublisher, &message))?
    } else {
        let publisher = NtfyPublisher::from_config(&config.notify)?;
        runtime.block_on(publish_daily(&publisher, &message))?
    };

    match outcome {
        PublishOutcome::Sent(receipt) if !dry_run => {
            println!(
                "sent to '{}' (HTTP {}{})",
                message.topic,
                receipt.status,
                receipt
                    .message_id
                    .map(|id| format!(", id {id}"))
                    .unwrap_or_default()
            );
        }
        PublishOutcome::Sent(_) => {}
        PublishOutcome::SkippedEmpty => println!("no quests today, nothing sent"),
    }
    Ok(())
}
