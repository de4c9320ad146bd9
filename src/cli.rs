//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oustdom")]
#[command(author, version, about = "Cumulative domain blocklist aggregator")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml", global = true)]
    pub config: PathBuf,

    /// Quiet mode (for cron/CI)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch sources and rebuild blocklists
    Build {
        /// Category to build (all categories when omitted)
        category: Option<String>,

        /// Skip combined statistics and main README generation
        #[arg(long)]
        no_combined: bool,
    },

    /// List configured categories
    Categories,

    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show version
    Version,
}
