//! Email delivery of scan reports.

use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::EmailConfig;

/// Sends the combined report via SMTP.
pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Send the report summary with the combined CSV attached
    /// (runs in a blocking task to avoid blocking the async executor).
    pub async fn send_report(
        &self,
        subject: &str,
        body: &str,
        attachment: &Path,
    ) -> Result<()> {
        let config = self.config.clone();
        let subject = subject.to_string();
        let body = body.to_string();
        let attachment = attachment.to_path_buf();

        tokio::task::spawn_blocking(move || send_blocking(&config, &subject, &body, &attachment))
            .await
            .context("Email task panicked")??;

        debug!("Report email sent successfully");
        Ok(())
    }
}

fn send_blocking(
    config: &EmailConfig,
    subject: &str,
    body: &str,
    attachment_path: &PathBuf,
) -> Result<()> {
    let csv_bytes = std::fs::read(attachment_path)
        .with_context(|| format!("Failed to read report attachment: {:?}", attachment_path))?;
    let file_name = attachment_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "report.csv".to_string());

    let email = Message::builder()
        .from(
            config
                .from
                .parse()
                .context("Invalid 'from' email address")?,
        )
        .to(config.to.parse().context("Invalid 'to' email address")?)
        .subject(subject)
        .multipart(
            MultiPart::mixed()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(body.to_string()),
                )
                .singlepart(Attachment::new(file_name).body(
                    csv_bytes,
                    ContentType::parse("text/csv")
                        .map_err(|e| anyhow::anyhow!("Invalid attachment content type: {:?}", e))?,
                )),
        )
        .context("Failed to build email")?;

    // Password comes from the env var or config (SecureString, zeroed on drop)
    let password = config.get_password();
    let creds = Credentials::new(config.smtp_user.clone(), password.as_str().to_string());

    let mailer = SmtpTransport::relay(&config.smtp_host)
        .context("Failed to create SMTP transport")?
        .port(config.smtp_port)
        .credentials(creds)
        .build();

    mailer.send(&email).context("Failed to send email")?;
    Ok(())
}

/// Subject and body for a scan report email.
pub fn report_email(org_name: &str, date: &str, total_rows: usize, bad_count: usize) -> (String, String) {
    (
        format!("Meraki bad client report - {} - {}", org_name, date),
        format!(
            "Scan of organization {} on {} finished.\n\
             Clients evaluated: {}\n\
             Clients flagged: {}\n\n\
             The combined report is attached.",
            org_name, date, total_rows, bad_count
        ),
    )
}
