//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "macwatch")]
#[command(author, version, about = "Find, report and block unauthorized clients on Meraki networks")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "macwatch.yaml", global = true)]
    pub config: PathBuf,

    /// Quiet mode (for cron/systemd timer)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan all networks of the organization and write reports
    Scan {
        /// Issue block calls for matched clients even if the config says not to
        #[arg(long)]
        block: bool,

        /// Dry-run mode: evaluate and report, never issue block calls
        #[arg(long)]
        dry_run: bool,
    },

    /// Evaluate a single MAC address against the configured lists
    Check {
        /// MAC address to check
        mac: String,
    },

    /// Show the loaded block/report lists
    Lists,

    /// Write a commented default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show version
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses_help() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_version_command() {
        let cli = Cli::try_parse_from(["macwatch", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_scan_defaults() {
        let cli = Cli::try_parse_from(["macwatch", "scan"]).unwrap();
        match cli.command {
            Commands::Scan { block, dry_run } => {
                assert!(!block);
                assert!(!dry_run);
            }
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_cli_scan_dry_run() {
        let cli = Cli::try_parse_from(["macwatch", "scan", "--dry-run"]).unwrap();
        match cli.command {
            Commands::Scan { dry_run, .. } => assert!(dry_run),
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_cli_scan_block_flag() {
        let cli = Cli::try_parse_from(["macwatch", "scan", "--block"]).unwrap();
        match cli.command {
            Commands::Scan { block, .. } => assert!(block),
            _ => panic!("Expected Scan command"),
        }
    }

    #[test]
    fn test_cli_check_command() {
        let cli = Cli::try_parse_from(["macwatch", "check", "aa:bb:cc:dd:ee:ff"]).unwrap();
        match cli.command {
            Commands::Check { mac } => assert_eq!(mac, "aa:bb:cc:dd:ee:ff"),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_lists_command() {
        let cli = Cli::try_parse_from(["macwatch", "lists"]).unwrap();
        assert!(matches!(cli.command, Commands::Lists));
    }

    #[test]
    fn test_cli_init_force() {
        let cli = Cli::try_parse_from(["macwatch", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "macwatch",
            "-q",
            "-v",
            "--config",
            "/custom/path.yaml",
            "lists",
        ])
        .unwrap();
        assert!(cli.quiet);
        assert!(cli.verbose);
        assert_eq!(cli.config.to_str().unwrap(), "/custom/path.yaml");
    }
}
