//! macwatch - Unauthorized Client Finder for Meraki Networks

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use macwatch::cli::{Cli, Commands};

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
        Commands::Scan { block, dry_run } => {
            macwatch::commands::scan::run(block, dry_run, &cli.config).await
        }
        Commands::Check { mac } => macwatch::commands::check::run(&mac, &cli.config),
        Commands::Lists => macwatch::commands::lists::run(&cli.config),
        Commands::Init { force } => macwatch::commands::init::run(force, &cli.config),
        Commands::Version => {
            println!("macwatch {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
