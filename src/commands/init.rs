//! Init command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::Config;

/// Run the init command: write the commented default config file.
pub fn run(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file {:?} already exists (use --force to overwrite)",
            config_path
        );
    }

    std::fs::write(config_path, Config::generate_default_yaml())
        .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

    info!("Wrote default config to {:?}", config_path);
    println!("[OK] Default config written to {}", config_path.display());

    Ok(())
}
