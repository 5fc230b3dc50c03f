use std::path::Path;

use anyhow::{bail, Result};
use bijli_cli::cli::ConfigCommands;
use bijli_cli::config::{config_path, save_config, BijliConfig};
use tracing::info;

pub fn handle(command: &ConfigCommands, config: &BijliConfig, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => config_path()?,
    };
    match command {
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "{} already exists; pass --force to overwrite it",
                    path.display()
                );
            }
            save_config(&BijliConfig::default(), &path)?;
            info!("Wrote default configuration to {}", path.display());
            println!("{}", path.display());
        }
        ConfigCommands::Show => {
            print!("{}", toml::to_string_pretty(config)?);
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
        }
    }
    Ok(())
}
