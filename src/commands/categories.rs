//! Categories command implementation.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::utils::truncate;

/// Run the categories command
pub fn run(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;

    if config.categories.is_empty() {
        println!("No categories configured.");
        return Ok(());
    }

    println!();
    println!(" {:<12} {:<14} {:>8} {}", "ID", "NAME", "SOURCES", "DESCRIPTION");
    println!(" {:-<12} {:-<14} {:->8} {:-<40}", "", "", "", "");
    for category in &config.categories {
        println!(
            " {:<12} {:<14} {:>8} {}",
            category.id,
            truncate(&category.name, 14),
            category.enabled_sources().len(),
            truncate(&category.description, 40),
        );
    }
    println!();

    Ok(())
}
