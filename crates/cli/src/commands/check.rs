//! `switchyard check` — validate config and print the effective values.

use std::path::Path;

use switchyard_config::AppConfig;

pub fn run(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(config_path)?;
    println!("Configuration OK ({})", config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
