pub mod calendar;
pub mod config;
pub mod daily;
pub mod notify;
pub mod quest;
pub mod score;
pub mod setup;

use chrono::{Local, NaiveDate};
use liferpg_core::storage::data_dir;
use liferpg_core::{Config, ConfigError};
use std::path::{Path, PathBuf};

/// Where the config comes from: `--config` or the data directory.
pub struct ConfigSource {
    explicit: Option<PathBuf>,
}

impl ConfigSource {
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    pub fn path(&self) -> Result<PathBuf, ConfigError> {
        match &self.explicit {
            Some(path) => Ok(path.clone()),
            None => Config::path(),
        }
    }

    /// Load the file (defaults when absent) without environment overrides.
    pub fn load_file(&self) -> Result<Config, ConfigError> {
        match &self.explicit {
            Some(path) if path.exists() => Config::load_from(path),
            Some(_) => Ok(Config::default()),
            None => Config::load(),
        }
    }

    /// Load the file and overlay `LIFERPG_*` environment values.
    pub fn load(&self) -> Result<Config, ConfigError> {
        tracing::debug!(explicit = ?self.explicit, "loading config");
        let mut config = self.load_file()?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Directory that holds the config file.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match self.explicit.as_deref().and_then(Path::parent) {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
            Some(_) => Ok(PathBuf::from(".")),
            None => data_dir(),
        }
    }

    /// Default calendar output: `calendar.output` or `quests.ics` next to
    /// the config file.
    pub fn calendar_path(&self, config: &Config) -> Result<PathBuf, ConfigError> {
        match &config.calendar.output {
            Some(path) => Ok(path.clone()),
            None => Ok(self.data_dir()?.join("quests.ics")),
        }
    }
}

/// `--date` value or today's local date.
pub fn resolve_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}
