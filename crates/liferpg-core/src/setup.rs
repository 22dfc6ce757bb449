//! First-run setup: data directory, default config, phone instructions.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::storage::Config;

/// What `prepare` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupReport {
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
    /// False when an existing config was left untouched.
    pub config_created: bool,
}

/// Create the directory holding `config_path` and a default config there
/// if none exists yet.
pub fn prepare(config_path: &Path) -> Result<SetupReport, ConfigError> {
    let data_dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&data_dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", data_dir.display())))?;

    let config_created = !config_path.exists();
    if config_created {
        Config::default().save_to(config_path)?;
        tracing::info!(path = %config_path.display(), "wrote default config");
    }

    Ok(SetupReport {
        data_dir,
        config_path: config_path.to_path_buf(),
        config_created,
    })
}

/// Manual steps to finish setting up the phone.
pub fn next_steps(config: &Config, calendar_path: &Path) -> String {
    let server = config.notify.server.trim_end_matches('/');
    indoc::formatdoc! {"
        Next steps (on your phone):

          1. Install the ntfy app (Android: Play Store or F-Droid, iOS: App Store).
          2. Subscribe to topic '{topic}' on {server}.
             Test it with: liferpg notify send
          3. Export the quest calendar:  liferpg calendar export
             then copy {calendar} to the phone and open it to import.
             Each quest gets a reminder {lead} minutes before it starts.
          4. For a daily push, schedule `liferpg daily` (e.g. cron: 0 7 * * *).
             Set LIFERPG_NTFY_TOPIC in that environment to override the topic.
        ",
        topic = config.notify.effective_topic(),
        server = server,
        calendar = calendar_path.display(),
        lead = config.calendar.reminder_lead_minutes,
    }
}
