//! CSV report writing.
//!
//! Each scan produces one CSV per network inside a dated run folder, plus a
//! combined CSV next to the folder with the same column schema. Rows are kept
//! in memory for the combined report; nothing is read back from disk.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::dashboard::{Client, Network};

/// One report line: a flattened client with its network context and verdict.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub network_name: String,
    pub network_id: String,
    pub id: String,
    pub mac: String,
    pub description: Option<String>,
    pub ip: Option<String>,
    pub user: Option<String>,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
    pub manufacturer: Option<String>,
    pub manufacturer_oui: Option<String>,
    pub os: Option<String>,
    pub ssid: Option<String>,
    pub status: Option<String>,
    pub usage: Option<String>,
    pub notes: Option<String>,
    pub bad: bool,
    pub blocked: bool,
}

impl ReportRow {
    pub fn new(
        network: &Network,
        client: &Client,
        oui_manufacturer: Option<&str>,
        bad: bool,
        blocked: bool,
    ) -> Self {
        Self {
            network_name: network.name.clone(),
            network_id: network.id.clone(),
            id: client.id.clone(),
            mac: client.mac.clone(),
            description: client.description.clone(),
            ip: client.ip.clone(),
            user: client.user.clone(),
            first_seen: client.first_seen.clone(),
            last_seen: client.last_seen.clone(),
            manufacturer: client.manufacturer.clone(),
            manufacturer_oui: oui_manufacturer.map(str::to_string),
            os: client.os.clone(),
            ssid: client.ssid.clone(),
            status: client.status.clone(),
            usage: client
                .usage
                .as_ref()
                .map(|u| format!("sent={} recv={}", u.sent, u.recv)),
            notes: client.notes.clone(),
            bad,
            blocked,
        }
    }
}

/// Writes per-network reports as they arrive and the combined report at the
/// end of the run.
pub struct ReportWriter {
    run_dir: PathBuf,
    combined_path: PathBuf,
    rows: Vec<ReportRow>,
    used_names: HashMap<String, u32>,
}

impl ReportWriter {
    /// Create the dated run folder under `report_dir`.
    pub fn create(report_dir: &Path, org_name: &str, date: NaiveDate) -> Result<Self> {
        let folder = format!("{}_clients_{}", sanitize_name(org_name), date.format("%m-%d-%Y"));
        let run_dir = report_dir.join(&folder);
        std::fs::create_dir_all(&run_dir)
            .with_context(|| format!("Failed to create report folder: {:?}", run_dir))?;
        let combined_path = report_dir.join(format!("{}.csv", folder));
        Ok(Self {
            run_dir,
            combined_path,
            rows: Vec::new(),
            used_names: HashMap::new(),
        })
    }

    /// Write one network's report and retain the rows for the combined file.
    /// A network with no clients still gets a header-only file. Network names
    /// that sanitize to the same string get a numeric suffix so no file is
    /// overwritten within a run.
    pub fn write_network(&mut self, network: &Network, rows: Vec<ReportRow>) -> Result<PathBuf> {
        let base = sanitize_name(&network.name);
        let seen = self.used_names.entry(base.clone()).or_insert(0);
        *seen += 1;
        let file_name = if *seen == 1 {
            format!("{}.csv", base)
        } else {
            format!("{}_{}.csv", base, seen)
        };
        let path = self.run_dir.join(file_name);
        write_csv(&path, &rows)?;
        info!("Wrote {} rows to {:?}", rows.len(), path);
        self.rows.extend(rows);
        Ok(path)
    }

    /// Number of rows collected so far.
    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    /// Write the combined report and return its path.
    pub fn finish(self) -> Result<PathBuf> {
        write_csv(&self.combined_path, &self.rows)?;
        info!(
            "Wrote combined report with {} rows to {:?}",
            self.rows.len(),
            self.combined_path
        );
        Ok(self.combined_path)
    }
}

fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Failed to create {:?}", path))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {:?}", path))?;
    }
    // serialize() only emits headers alongside the first row
    if rows.is_empty() {
        writer.write_record(HEADERS)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {:?}", path))?;
    Ok(())
}

/// Column order, matching the `ReportRow` field order.
const HEADERS: &[&str] = &[
    "network_name",
    "network_id",
    "id",
    "mac",
    "description",
    "ip",
    "user",
    "first_seen",
    "last_seen",
    "manufacturer",
    "manufacturer_oui",
    "os",
    "ssid",
    "status",
    "usage",
    "notes",
    "bad",
    "blocked",
];

/// Make a network or organization name safe as a file name.
/// Spaces are dropped, path-hostile characters replaced.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned
    }
}
