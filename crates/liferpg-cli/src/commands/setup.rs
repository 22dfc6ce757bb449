use liferpg_core::setup::{next_steps, prepare};
use liferpg_core::Config;

use super::ConfigSource;

pub fn run(source: &ConfigSource) -> Result<(), Box<dyn std::error::Error>> {
    let report = prepare(&source.path()?)?;

    println!("data directory: {}", report.data_dir.display());
    if report.config_created {
        println!("created {}", report.config_path.display());
    } else {
        println!("kept existing {}", report.config_path.display());
    }

    let mut config = Config::load_from(&report.config_path)?;
    config.apply_env(|key| std::env::var(key).ok());

    println!();
    print!("{}", next_steps(&config, &source.calendar_path(&config)?));
    Ok(())
}
