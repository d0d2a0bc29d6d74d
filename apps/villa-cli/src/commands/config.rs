//! `config`: show or write the effective configuration.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::AppConfig;

pub fn run(config: &AppConfig, config_path: Option<PathBuf>, save: bool) -> Result<()> {
    if save {
        let path = config.save(config_path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    if let Some(path) = config_path.or_else(AppConfig::default_config_path) {
        println!("# {}", path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
