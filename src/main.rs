//! oustdom - Cumulative Domain Blocklist Aggregator
//!
//! Fetches public domain blocklists, normalizes them to canonical domains
//! and merges them into append-only per-category lists.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use oustdom::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Build {
            category,
            no_combined,
        } => oustdom::commands::build::run(category, no_combined, &cli.config).await,
        Commands::Categories => oustdom::commands::categories::run(&cli.config),
        Commands::Init { force } => oustdom::commands::init::run(&cli.config, force),
        Commands::Version => {
            println!("oustdom {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
