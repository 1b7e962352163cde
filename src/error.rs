//! Error types for macwatch.

use thiserror::Error;

/// Errors surfaced by the Meraki Dashboard collaborator.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Meraki API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Missing API key: set MERAKI_DASHBOARD_API_KEY or configure api_key")]
    MissingApiKey,

    #[error("Request failed after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },
}
