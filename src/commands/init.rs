//! Init command implementation: write a commented default config.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;

/// Run the init command
pub fn run(force: bool, config_path: &Path) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {:?} (use --force to overwrite)",
            config_path
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }
    }

    std::fs::write(config_path, Config::generate_default_yaml())
        .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

    println!("Wrote default config to {:?}", config_path);
    println!("Set org_id and export MERAKI_DASHBOARD_API_KEY before scanning.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_parseable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("macwatch.yaml");
        run(false, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Config = serde_yaml::from_str(&content).unwrap();
        assert_eq!(parsed.lookback_days, 30);
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("macwatch.yaml");
        std::fs::write(&path, "org_id: keep\n").unwrap();

        assert!(run(false, &path).is_err());
        assert!(std::fs::read_to_string(&path).unwrap().contains("keep"));

        assert!(run(true, &path).is_ok());
        assert!(!std::fs::read_to_string(&path).unwrap().contains("keep"));
    }
}
