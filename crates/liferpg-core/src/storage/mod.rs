mod config;

pub use config::{
    CalendarConfig, Config, NotifyConfig, DEFAULT_SERVER, DEFAULT_TITLE, DEFAULT_TOPIC,
};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `LIFERPG_HOME` wins when set. Otherwise `~/.config/liferpg`, or
/// `~/.config/liferpg-dev` when `LIFERPG_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var("LIFERPG_HOME") {
        Ok(home) if !home.trim().is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("LIFERPG_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("liferpg-dev")
            } else {
                base_dir.join("liferpg")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
