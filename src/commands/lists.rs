//! Lists command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::lists::{BlockList, CompanyList};

/// Run the lists command
pub fn run(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let macs = BlockList::load(&config.bad_macs_file)?;
    let companies = CompanyList::load(&config.bad_companies_file)?;

    println!("Blocked MACs ({:?}): {}", config.bad_macs_file, macs.len());
    let mut sorted: Vec<_> = macs.iter().collect();
    sorted.sort_unstable();
    for mac in sorted {
        println!("  {}", mac);
    }

    println!();
    println!(
        "Company fragments ({:?}): {}",
        config.bad_companies_file,
        companies.len()
    );
    for fragment in companies.iter() {
        println!("  {}", fragment);
    }

    Ok(())
}
