//! Scan command implementation: the full fetch/evaluate/block/report pass.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::alerts::{report_email, Mailer};
use crate::blocker::apply_block;
use crate::config::Config;
use crate::dashboard::{Dashboard, MerakiDashboard};
use crate::lists::{BlockList, CompanyList};
use crate::matcher::is_bad_client;
use crate::oui::{lookup_manufacturer, OuiDb};
use crate::report::{ReportRow, ReportWriter};

/// Totals for one scan pass.
#[derive(Debug)]
pub struct ScanSummary {
    pub org_name: String,
    pub networks_total: usize,
    pub networks_scanned: usize,
    pub clients_evaluated: usize,
    pub bad_clients: usize,
    pub blocked_clients: usize,
    pub combined_report: PathBuf,
}

/// Run the scan command
pub async fn run(block: bool, dry_run: bool, config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Configuration errors are fatal before any network call
    if config.org_id.trim().is_empty() {
        anyhow::bail!("org_id must be set in {:?}", config_path);
    }
    let api_key = config.get_api_key();
    let macs = BlockList::load(&config.bad_macs_file)?;
    let companies = CompanyList::load(&config.bad_companies_file)?;
    let oui = match &config.oui_file {
        Some(path) => OuiDb::load(path)?,
        None => OuiDb::empty(),
    };
    info!(
        "Loaded {} blocked MACs, {} company fragments, {} OUI entries",
        macs.len(),
        companies.len(),
        oui.len()
    );

    let blocking = (config.block_bad_clients || block) && !dry_run;
    if dry_run {
        info!("Dry-run mode: block calls disabled");
    } else if blocking {
        info!("Blocking enabled: matched clients will be blocked");
    }

    let api = MerakiDashboard::new(&config.base_url, api_key)?;
    let summary = scan_org(&api, &config, blocking, &macs, &companies, &oui).await?;

    println!();
    println!(
        "[OK] {}: {} of {} networks scanned, {} clients evaluated, {} flagged, {} blocked",
        summary.org_name,
        summary.networks_scanned,
        summary.networks_total,
        summary.clients_evaluated,
        summary.bad_clients,
        summary.blocked_clients
    );
    println!("Combined report: {:?}", summary.combined_report);

    let mailer = Mailer::new(config.email.clone());
    if mailer.is_enabled() {
        let date = Local::now().format("%m-%d-%Y").to_string();
        let (subject, body) = report_email(
            &summary.org_name,
            &date,
            summary.clients_evaluated,
            summary.bad_clients,
        );
        mailer
            .send_report(&subject, &body, &summary.combined_report)
            .await
            .context("Failed to email the combined report")?;
        println!("Report sent to {}", config.email.to);
    }

    Ok(())
}

/// One sequential pass over every network of the organization.
///
/// A failure listing networks aborts the run; a failure fetching one
/// network's clients skips that network with a warning and continues.
pub async fn scan_org(
    api: &dyn Dashboard,
    config: &Config,
    blocking: bool,
    macs: &BlockList,
    companies: &CompanyList,
    oui: &OuiDb,
) -> Result<ScanSummary> {
    let org = api
        .get_organization(&config.org_id)
        .await
        .with_context(|| format!("Failed to fetch organization {}", config.org_id))?;
    if org.id != config.org_id {
        anyhow::bail!("Org ids not identical: {} != {}", config.org_id, org.id);
    }
    info!("Analyzing organization {}", org.name);

    let networks = api
        .get_networks(&org.id)
        .await
        .with_context(|| format!("Failed to list networks for organization {}", org.name))?;
    info!(
        "Found {} networks in organization {}",
        networks.len(),
        org.name
    );

    let mut writer = ReportWriter::create(&config.report_dir, &org.name, Local::now().date_naive())?;
    let mut networks_scanned = 0;
    let mut bad_clients = 0;
    let mut blocked_clients = 0;

    for (index, network) in networks.iter().enumerate() {
        info!(
            "Searching clients in network {} ({} of {})",
            network.name,
            index + 1,
            networks.len()
        );

        let clients = match api
            .get_network_clients(&network.id, config.timespan_secs())
            .await
        {
            Ok(clients) => clients,
            Err(e) => {
                warn!(
                    "Skipping network {} ({}): failed to fetch clients: {}",
                    network.name, network.id, e
                );
                continue;
            }
        };
        networks_scanned += 1;
        debug!("Found {} clients in {}", clients.len(), network.name);

        let mut rows = Vec::with_capacity(clients.len());
        for client in &clients {
            let oui_manufacturer = lookup_manufacturer(oui, &client.mac);
            let bad = is_bad_client(
                &client.mac,
                client.manufacturer.as_deref(),
                oui_manufacturer,
                macs,
                companies,
            );

            let mut blocked = false;
            if bad {
                bad_clients += 1;
                debug!(
                    "Bad client {} ({}) in network {}",
                    client.id, client.mac, network.name
                );
                if blocking {
                    blocked = apply_block(api, &network.id, client).await;
                    if blocked {
                        blocked_clients += 1;
                    }
                }
            }

            rows.push(ReportRow::new(network, client, oui_manufacturer, bad, blocked));
        }

        writer.write_network(network, rows)?;
    }

    let clients_evaluated = writer.total_rows();
    let combined_report = writer.finish()?;

    Ok(ScanSummary {
        org_name: org.name,
        networks_total: networks.len(),
        networks_scanned,
        clients_evaluated,
        bad_clients,
        blocked_clients,
        combined_report,
    })
}
