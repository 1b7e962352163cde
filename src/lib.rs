//! # macwatch - Unauthorized Client Finder for Meraki Networks
//!
//! Queries the Meraki Dashboard API for clients seen on every network of an
//! organization, flags clients whose hardware address or manufacturer matches
//! configured block/report lists, optionally applies the "Blocked" policy to
//! matches, and writes per-network plus combined CSV reports.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        macwatch                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: scan, check, lists, init, version          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! │    └── Org, credentials, lookback window, list files        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Lists (bad_macs.txt, bad_companies.txt)                    │
//! │    └── MAC normalization + fragment lists                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Dashboard (reqwest + rustls, Dashboard trait)              │
//! │    └── Organizations, networks, clients, policy calls       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Matcher + OUI lookup                                       │
//! │    └── Pure verdict over MAC and manufacturer strings       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Blocker + Reporter (csv)                                   │
//! │    └── Policy calls, per-network + combined CSVs            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Alerts (smtp)                                              │
//! │    └── Combined report emailed after each scan              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use macwatch::config::Config;
//! use macwatch::dashboard::MerakiDashboard;
//! use macwatch::lists::{BlockList, CompanyList};
//! use macwatch::oui::OuiDb;
//! use macwatch::commands::scan::scan_org;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("macwatch.yaml")?;
//!     let macs = BlockList::load(&config.bad_macs_file)?;
//!     let companies = CompanyList::load(&config.bad_companies_file)?;
//!     let api = MerakiDashboard::new(&config.base_url, config.get_api_key())?;
//!
//!     let summary = scan_org(&api, &config, false, &macs, &companies, &OuiDb::empty()).await?;
//!     println!("{} clients flagged", summary.bad_clients);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`alerts`] - Email delivery of the combined report
//! - [`blocker`] - Block policy calls for matched clients
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`dashboard`] - Meraki Dashboard API collaborator
//! - [`error`] - Error types
//! - [`lists`] - Block/report list loading and MAC normalization
//! - [`matcher`] - Client match evaluation
//! - [`oui`] - Local OUI-to-manufacturer lookup
//! - [`report`] - CSV report writing

pub mod alerts;
pub mod blocker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod lists;
pub mod matcher;
pub mod oui;
pub mod report;

pub use cli::{Cli, Commands};
pub use config::Config;
