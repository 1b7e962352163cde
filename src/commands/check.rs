//! Check command implementation.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::lists::{normalize_mac, BlockList, CompanyList};
use crate::matcher::evaluate;
use crate::oui::OuiDb;

/// Run the check command
pub fn run(mac: &str, config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let canonical =
        normalize_mac(mac).ok_or_else(|| anyhow::anyhow!("Invalid MAC address: {}", mac))?;

    let macs = BlockList::load(&config.bad_macs_file)?;
    let companies = CompanyList::load(&config.bad_companies_file)?;
    let oui = match &config.oui_file {
        Some(path) => OuiDb::load(path)?,
        None => OuiDb::empty(),
    };

    let oui_manufacturer = oui.lookup(&canonical);
    if let Some(name) = oui_manufacturer {
        println!("{} resolves to manufacturer: {}", canonical, name);
    } else {
        println!("{} has no local OUI match", canonical);
    }

    match evaluate(&canonical, None, oui_manufacturer, &macs, &companies) {
        Some(reason) => println!("[BAD] {}: {}", canonical, reason),
        None => println!("[OK] {} matches no list entry", canonical),
    }

    Ok(())
}
