//! Block/report list loading and MAC normalization.
//!
//! Two flat text files drive the matcher: `bad_macs.txt` (one hardware
//! address per line) and `bad_companies.txt` (one manufacturer-name fragment
//! per line). Both are loaded once at startup and immutable for the run.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// Normalize a MAC address to the canonical uppercase, colon-delimited form.
///
/// Accepts colon, dash and dot separators as well as bare hex
/// (`aa:bb:cc:dd:ee:ff`, `AA-BB-CC-DD-EE-FF`, `aabb.ccdd.eeff`,
/// `aabbccddeeff`). Returns `None` for anything that is not 12 hex digits.
pub fn normalize_mac(raw: &str) -> Option<String> {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | '.'))
        .collect();

    if digits.len() != 12 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let upper = digits.to_ascii_uppercase();
    let mut mac = String::with_capacity(17);
    for (i, c) in upper.chars().enumerate() {
        if i > 0 && i % 2 == 0 {
            mac.push(':');
        }
        mac.push(c);
    }
    Some(mac)
}

/// Set of blocked MAC addresses, stored in canonical form.
#[derive(Debug, Clone, Default)]
pub struct BlockList {
    macs: HashSet<String>,
}

impl BlockList {
    /// Load from a file with one MAC per line. Blank lines and `#` comments
    /// are skipped; lines that do not parse as a MAC are skipped with a
    /// warning rather than aborting the run.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read MAC list: {:?}", path.as_ref()))?;
        Ok(Self::parse(&content))
    }

    /// Parse list content (one MAC per line).
    pub fn parse(content: &str) -> Self {
        let mut macs = HashSet::new();
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match normalize_mac(trimmed) {
                Some(mac) => {
                    macs.insert(mac);
                }
                None => warn!("Skipping invalid MAC in block list: {}", trimmed),
            }
        }
        Self { macs }
    }

    /// Exact membership test. The candidate is normalized first, so any
    /// accepted input format compares equal to the stored canonical form.
    pub fn contains(&self, mac: &str) -> bool {
        normalize_mac(mac)
            .map(|m| self.macs.contains(&m))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.macs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macs.is_empty()
    }

    /// Iterate over the canonical MACs (arbitrary order).
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.macs.iter().map(|s| s.as_str())
    }
}

/// Ordered list of manufacturer-name fragments to flag.
#[derive(Debug, Clone, Default)]
pub struct CompanyList {
    fragments: Vec<String>,
}

impl CompanyList {
    /// Load from a file with one fragment per line, case preserved.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read company list: {:?}", path.as_ref()))?;
        Ok(Self::parse(&content))
    }

    /// Parse list content. Blank lines are dropped: an empty fragment would
    /// be a substring of every manufacturer string.
    pub fn parse(content: &str) -> Self {
        let fragments = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { fragments }
    }

    /// Return the first fragment contained in `manufacturer`, case-sensitive.
    /// An empty manufacturer string never matches.
    pub fn first_match(&self, manufacturer: &str) -> Option<&str> {
        if manufacturer.is_empty() {
            return None;
        }
        self.fragments
            .iter()
            .find(|f| manufacturer.contains(f.as_str()))
            .map(|f| f.as_str())
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Iterate fragments in file order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|s| s.as_str())
    }
}
