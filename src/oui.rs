//! Local OUI-to-manufacturer lookup.
//!
//! Parses a Wireshark `manuf`-format table (tab-separated: prefix, short
//! name, optional long name). Most entries are plain 24-bit OUIs; registries
//! also hand out longer blocks written as `AA:BB:CC:D0:00:00/28`. Lookups
//! prefer the longest matching prefix and return `None` when unresolved.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

use crate::lists::normalize_mac;

/// Bits in a full hardware address.
const MAC_BITS: u8 = 48;

/// Manufacturer table keyed by MAC prefix.
#[derive(Debug, Clone, Default)]
pub struct OuiDb {
    /// Plain 24-bit OUI entries, keyed by the top three bytes.
    exact: HashMap<u32, String>,
    /// Entries with an explicit mask longer than 24 bits.
    ranged: Vec<RangedEntry>,
}

#[derive(Debug, Clone)]
struct RangedEntry {
    value: u64,
    mask: u8,
    name: String,
}

impl OuiDb {
    /// Empty table: every lookup resolves to `None`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a `manuf`-format table from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read OUI table: {:?}", path.as_ref()))?;
        Ok(Self::parse(&content))
    }

    /// Parse `manuf` content. Unparseable lines are ignored.
    pub fn parse(content: &str) -> Self {
        let mut db = Self::default();
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let mut fields = trimmed.split('\t').map(str::trim);
            let (Some(prefix), Some(short)) = (fields.next(), fields.next()) else {
                continue;
            };
            // Prefer the long vendor name when the table carries one.
            let name = match fields.next() {
                Some(long) if !long.is_empty() => long,
                _ => short,
            };
            db.insert(prefix, name);
        }
        db
    }

    fn insert(&mut self, prefix: &str, name: &str) {
        let (addr_part, mask) = match prefix.split_once('/') {
            Some((addr, mask_str)) => {
                let Ok(mask) = mask_str.parse::<u8>() else {
                    return;
                };
                if mask == 0 || mask > MAC_BITS {
                    return;
                }
                (addr, mask)
            }
            None => (prefix, 24),
        };

        let Some(value) = prefix_to_u64(addr_part) else {
            return;
        };

        if mask == 24 {
            self.exact.insert((value >> 24) as u32, name.to_string());
        } else {
            self.ranged.push(RangedEntry {
                value,
                mask,
                name: name.to_string(),
            });
        }
    }

    /// Resolve a MAC address to a manufacturer name, longest prefix first.
    pub fn lookup(&self, mac: &str) -> Option<&str> {
        let value = prefix_to_u64(mac)?;

        let mut best: Option<(&str, u8)> = None;
        for entry in &self.ranged {
            let shift = MAC_BITS - entry.mask;
            if value >> shift == entry.value >> shift {
                match best {
                    Some((_, mask)) if mask >= entry.mask => {}
                    _ => best = Some((entry.name.as_str(), entry.mask)),
                }
            }
        }
        if let Some((name, _)) = best {
            return Some(name);
        }

        self.exact.get(&((value >> 24) as u32)).map(|s| s.as_str())
    }

    /// Total number of entries in the table.
    pub fn len(&self) -> usize {
        self.exact.len() + self.ranged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.ranged.is_empty()
    }
}

/// Parse a MAC or MAC prefix into a left-aligned 48-bit value.
/// Short prefixes like `00:00:0C` are padded with zero bytes on the right.
fn prefix_to_u64(raw: &str) -> Option<u64> {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, ':' | '-' | '.'))
        .collect();
    if digits.is_empty() || digits.len() > 12 || digits.len() % 2 != 0 {
        return None;
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u64::from_str_radix(&digits, 16).ok()?;
    Some(value << (4 * (12 - digits.len() as u64)))
}

/// Convenience: resolve a MAC after normalization, as the scan pipeline does.
pub fn lookup_manufacturer<'a>(db: &'a OuiDb, mac: &str) -> Option<&'a str> {
    let canonical = normalize_mac(mac)?;
    db.lookup(&canonical)
}
