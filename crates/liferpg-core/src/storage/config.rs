//! TOML-based application configuration.
//!
//! Stores:
//! - Notification relay settings (server, topic, title, token)
//! - Calendar export settings (output path, reminder lead, recurrence)
//! - The quest table, when the user overrides the built-in one
//!
//! Configuration is stored at `~/.config/liferpg/config.toml`. Automated
//! daily runs can supply the topic and secrets through the environment
//! instead (see [`Config::apply_env`]).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::calendar::{ExportOptions, DEFAULT_REMINDER_LEAD_MINUTES};
use crate::error::ConfigError;
use crate::quest::QuestTable;

pub const DEFAULT_SERVER: &str = "https://ntfy.sh";
pub const DEFAULT_TOPIC: &str = "liferpg-daily";
pub const DEFAULT_TITLE: &str = "Today's Quests";

const REDACTED: &str = "********";

/// Notification relay configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_server")]
    pub server: String,
    /// Blank means [`DEFAULT_TOPIC`].
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default = "default_title")]
    pub title: String,
    /// ntfy priority, 1 (min) to 5 (max).
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Access token for protected topics.
    #[serde(default)]
    pub token: Option<String>,
}

/// Calendar export configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Defaults to `<data dir>/quests.ics`.
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default = "default_reminder_lead")]
    pub reminder_lead_minutes: u32,
    #[serde(default = "default_true")]
    pub recurring: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/liferpg/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Token for a third-party recovery-data service.
    #[serde(default)]
    pub recovery_token: Option<String>,
    /// Quest table override. `None` uses the built-in table.
    #[serde(default)]
    pub quests: Option<QuestTable>,
}

fn default_server() -> String {
    DEFAULT_SERVER.into()
}
fn default_topic() -> String {
    DEFAULT_TOPIC.into()
}
fn default_title() -> String {
    DEFAULT_TITLE.into()
}
fn default_reminder_lead() -> u32 {
    DEFAULT_REMINDER_LEAD_MINUTES
}
fn default_true() -> bool {
    true
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            topic: default_topic(),
            title: default_title(),
            priority: None,
            tags: Vec::new(),
            token: None,
        }
    }
}

impl NotifyConfig {
    /// Configured topic, or the default when it is blank.
    pub fn effective_topic(&self) -> &str {
        let topic = self.topic.trim();
        if topic.is_empty() {
            DEFAULT_TOPIC
        } else {
            topic
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            output: None,
            reminder_lead_minutes: default_reminder_lead(),
            recurring: true,
        }
    }
}

impl CalendarConfig {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            reminder_lead_minutes: self.reminder_lead_minutes,
            recurring: self.recurring,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notify: NotifyConfig::default(),
            calendar: CalendarConfig::default(),
            recovery_token: None,
            quests: None,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Candidate JSON values for `raw`, shaped after the existing leaf.
    ///
    /// Unset optional leaves (`null`) try a JSON reading first and then a
    /// plain string.
    fn leaf_candidates(
        existing: &serde_json::Value,
        key: &str,
        raw: &str,
    ) -> Result<Vec<serde_json::Value>, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let values = match existing {
            serde_json::Value::Bool(_) => vec![serde_json::Value::Bool(
                raw.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
            )],
            serde_json::Value::Number(_) => {
                let n = raw
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("cannot parse '{raw}' as number")))?;
                vec![serde_json::Value::Number(n.into())]
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                vec![serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?]
            }
            serde_json::Value::Null => {
                let mut values = Vec::new();
                if let Ok(parsed) = serde_json::from_str(raw) {
                    values.push(parsed);
                }
                values.push(serde_json::Value::String(raw.into()));
                values
            }
            serde_json::Value::String(_) => vec![serde_json::Value::String(raw.into())],
        };
        Ok(values)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                if !obj.contains_key(part) {
                    return Err(unknown());
                }
                obj.insert(part.to_string(), value);
                return Ok(());
            }
            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of the default config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(e.to_string()))?;
        let cfg: Config = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Overlay environment values used by scheduled runs.
    ///
    /// Recognized: `LIFERPG_NTFY_TOPIC`, `LIFERPG_NTFY_SERVER`,
    /// `LIFERPG_NTFY_TOKEN`, `LIFERPG_RECOVERY_TOKEN`. Blank values are
    /// ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(topic) = get("LIFERPG_NTFY_TOPIC") {
            self.notify.topic = topic;
        }
        if let Some(server) = get("LIFERPG_NTFY_SERVER") {
            self.notify.server = server;
        }
        if let Some(token) = get("LIFERPG_NTFY_TOKEN") {
            self.notify.token = Some(token);
        }
        if let Some(token) = get("LIFERPG_RECOVERY_TOKEN") {
            self.recovery_token = Some(token);
        }
    }

    /// Load from disk and overlay the process environment.
    pub fn load_with_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::load()?;
        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// The configured quest table, or the built-in one.
    pub fn quest_table(&self) -> QuestTable {
        self.quests.clone().unwrap_or_else(QuestTable::default_daily)
    }

    /// Copy with secrets masked, for display.
    pub fn redacted(&self) -> Self {
        let mut cfg = self.clone();
        if cfg.notify.token.is_some() {
            cfg.notify.token = Some(REDACTED.into());
        }
        if cfg.recovery_token.is_some() {
            cfg.recovery_token = Some(REDACTED.into());
        }
        cfg
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit
    /// the field.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        let existing = Self::get_json_value_by_path(&json, key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let mut last_error = None;
        for candidate in Self::leaf_candidates(existing, key, value)? {
            let mut updated = json.clone();
            Self::set_json_value_by_path(&mut updated, key, candidate)?;
            match serde_json::from_value::<Config>(updated) {
                Ok(cfg) => {
                    *self = cfg;
                    return Ok(());
                }
                Err(e) => last_error = Some(e.to_string()),
            }
        }

        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: last_error.unwrap_or_else(|| "value rejected".into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = Config::default();
        assert_eq!(cfg.notify.server, "https://ntfy.sh");
        assert_eq!(cfg.notify.topic, "liferpg-daily");
        assert_eq!(cfg.notify.title, "Today's Quests");
        assert_eq!(cfg.calendar.reminder_lead_minutes, 10);
        assert!(cfg.calendar.recurring);
        assert!(cfg.quests.is_none());
        assert_eq!(cfg.quest_table(), QuestTable::default_daily());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let cfg: Config = toml::from_str("[notify]\ntopic = \"my-quests\"\n").unwrap();
        assert_eq!(cfg.notify.topic, "my-quests");
        assert_eq!(cfg.notify.server, DEFAULT_SERVER);
        assert_eq!(cfg.calendar, CalendarConfig::default());
    }

    #[test]
    fn blank_topic_falls_back_to_default() {
        let notify = NotifyConfig {
            topic: String::new(),
            ..NotifyConfig::default()
        };
        assert_eq!(notify.effective_topic(), DEFAULT_TOPIC);
    }

    #[test]
    fn apply_env_overrides_topic_and_secrets() {
        let env: HashMap<&str, &str> = [
            ("LIFERPG_NTFY_TOPIC", "cron-topic"),
            ("LIFERPG_NTFY_SERVER", ""),
            ("LIFERPG_RECOVERY_TOKEN", "rt-123"),
        ]
        .into_iter()
        .collect();

        let mut cfg = Config::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.notify.topic, "cron-topic");
        assert_eq!(cfg.notify.server, DEFAULT_SERVER);
        assert_eq!(cfg.recovery_token.as_deref(), Some("rt-123"));
        assert!(cfg.notify.token.is_none());
    }

    #[test]
    fn save_and_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.notify.topic = "saved-topic".into();
        cfg.quests = Some(QuestTable::default_daily());
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_from_reports_parse_failures() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "notify = 3").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("notify.topic").as_deref(), Some("liferpg-daily"));
        assert_eq!(cfg.get("calendar.recurring").as_deref(), Some("true"));
        assert_eq!(cfg.get("calendar.reminder_lead_minutes").as_deref(), Some("10"));
        assert!(cfg.get("notify.missing_key").is_none());
    }

    #[test]
    fn set_updates_typed_fields() {
        let mut cfg = Config::default();
        cfg.set("calendar.recurring", "false").unwrap();
        cfg.set("calendar.reminder_lead_minutes", "15").unwrap();
        cfg.set("notify.title", "Quest Board").unwrap();

        assert!(!cfg.calendar.recurring);
        assert_eq!(cfg.calendar.reminder_lead_minutes, 15);
        assert_eq!(cfg.notify.title, "Quest Board");
    }

    #[test]
    fn set_fills_optional_fields() {
        let mut cfg = Config::default();
        cfg.set("notify.priority", "4").unwrap();
        cfg.set("notify.token", "12345").unwrap();
        cfg.set("calendar.output", "/tmp/quests.ics").unwrap();

        assert_eq!(cfg.notify.priority, Some(4));
        assert_eq!(cfg.notify.token.as_deref(), Some("12345"));
        assert_eq!(cfg.calendar.output, Some(PathBuf::from("/tmp/quests.ics")));
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_type() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("notify.nonexistent", "x"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set("calendar.recurring", "not_a_bool"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("notify.priority", "loud"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_quests_from_json() {
        let mut cfg = Config::default();
        cfg.set(
            "quests",
            r#"[{"id":"piano","hour":21,"minute":0,"duration_minutes":20}]"#,
        )
        .unwrap();

        let table = cfg.quest_table();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("piano").unwrap().hour, 21);
    }

    #[test]
    fn redacted_masks_secrets() {
        let mut cfg = Config::default();
        cfg.notify.token = Some("tk_secret".into());
        cfg.recovery_token = Some("rt_secret".into());

        let shown = cfg.redacted();
        assert_eq!(shown.notify.token.as_deref(), Some(REDACTED));
        assert_eq!(shown.recovery_token.as_deref(), Some(REDACTED));
        assert_eq!(Config::default().redacted().notify.token, None);
    }
}
