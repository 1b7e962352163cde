//! Configuration management for macwatch.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Environment variable consulted before the configured API key.
pub const API_KEY_ENV: &str = "MERAKI_DASHBOARD_API_KEY";

/// Meraki caps the client lookback window at 31 days.
const MAX_LOOKBACK_DAYS: u32 = 31;

/// Secure string type that zeroizes memory on drop.
/// Used for sensitive data like API keys and SMTP passwords.
#[derive(Clone, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Meraki organization to audit
    pub org_id: String,

    /// Dashboard API key; MERAKI_DASHBOARD_API_KEY takes precedence.
    /// Memory is securely zeroed when dropped
    pub api_key: SecureString,

    /// Dashboard API base URL
    pub base_url: String,

    /// Client lookback window in days (1..=31)
    pub lookback_days: u32,

    /// Actually issue block policy calls for matched clients
    pub block_bad_clients: bool,

    /// One blocked MAC address per line
    pub bad_macs_file: PathBuf,

    /// One manufacturer-name fragment per line
    pub bad_companies_file: PathBuf,

    /// Wireshark manuf-format OUI table; lookups are skipped when unset
    pub oui_file: Option<PathBuf>,

    /// Directory the per-run report folder is created under
    pub report_dir: PathBuf,

    /// Email delivery of the combined report
    pub email: EmailConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            org_id: String::new(),
            api_key: SecureString::default(),
            base_url: "https://api.meraki.com/api/v1".to_string(),
            lookback_days: 30,
            block_bad_clients: false,
            bad_macs_file: PathBuf::from("bad_macs.txt"),
            bad_companies_file: PathBuf::from("bad_companies.txt"),
            oui_file: None,
            report_dir: PathBuf::from("reports"),
            email: EmailConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values. An empty org_id is tolerated here so
    /// offline commands work against a freshly generated config; the scan
    /// command requires it.
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must use HTTPS: {}", self.base_url);
        }

        if self.lookback_days == 0 || self.lookback_days > MAX_LOOKBACK_DAYS {
            anyhow::bail!(
                "lookback_days must be between 1 and {}, got {}",
                MAX_LOOKBACK_DAYS,
                self.lookback_days
            );
        }

        Ok(())
    }

    /// Save configuration to YAML file atomically
    ///
    /// Uses tempfile + rename pattern to prevent corruption on crash.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let path = path.as_ref();
        let content = serde_yaml::to_string(self).with_context(|| "Failed to serialize config")?;

        let parent_dir = path.parent().unwrap_or(Path::new("."));
        let mut temp_file = NamedTempFile::new_in(parent_dir)
            .context("Failed to create temporary file for config")?;

        temp_file.write_all(content.as_bytes())?;
        temp_file.as_file().sync_all()?;

        temp_file
            .persist(path)
            .with_context(|| format!("Failed to persist config file: {:?}", path))?;

        Ok(())
    }

    /// Get the effective API key, checking the env var first
    /// Returns a SecureString that will be zeroed when dropped
    pub fn get_api_key(&self) -> SecureString {
        if let Ok(val) = env::var(API_KEY_ENV) {
            if !val.is_empty() {
                return SecureString::new(val);
            }
        }
        self.api_key.clone()
    }

    /// Lookback window converted to the API's timespan parameter.
    pub fn timespan_secs(&self) -> u64 {
        u64::from(self.lookback_days) * 24 * 60 * 60
    }

    /// Generate default config with comments
    pub fn generate_default_yaml() -> String {
        include_str!("../templates/config.yaml").to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    /// Password can be set directly or via MACWATCH_SMTP_PASSWORD env var
    /// Memory is securely zeroed when dropped
    pub smtp_password: SecureString,
    pub from: String,
    pub to: String,
}

impl EmailConfig {
    /// Get the effective password, checking the env var first
    /// Returns a SecureString that will be zeroed when dropped
    pub fn get_password(&self) -> SecureString {
        if let Ok(val) = env::var("MACWATCH_SMTP_PASSWORD") {
            return SecureString::new(val);
        }
        self.smtp_password.clone()
    }
}
