use clap::Subcommand;
use liferpg_core::Config;

use super::ConfigSource;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "notify.topic", "calendar.recurring")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values (secrets masked)
    List,
    /// Reset config to defaults
    Reset,
    /// Print the config file location
    Path,
}

pub fn run(action: ConfigAction, source: &ConfigSource) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = source.load()?.redacted();
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = source.load_file()?;
            config.set(&key, &value)?;
            config.save_to(&source.path()?)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = source.load()?.redacted();
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            Config::default().save_to(&source.path()?)?;
            println!("config reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", source.path()?.display());
        }
    }
    Ok(())
}
