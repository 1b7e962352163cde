//! Meraki Dashboard API collaborator.
//!
//! The [`Dashboard`] trait is the seam the scan pipeline is written against;
//! [`MerakiDashboard`] is the reqwest-backed implementation. Tests mock the
//! trait instead of talking to the API.

use async_trait::async_trait;
use reqwest::header::LINK;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

#[cfg(test)]
use mockall::automock;

use crate::config::SecureString;
use crate::error::DashboardError;

const TIMEOUT_SECS: u64 = 30;
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 2000;

/// Page size for list endpoints (the Dashboard maximum).
const PER_PAGE: u32 = 1000;

/// An organization, as returned by the Dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// A network within an organization.
#[derive(Debug, Clone, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
}

/// A client record from the network clients endpoint.
///
/// Only the attributes the reports carry are deserialized; the Dashboard
/// returns more, which serde ignores.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub mac: String,
    pub description: Option<String>,
    pub ip: Option<String>,
    pub user: Option<String>,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
    pub manufacturer: Option<String>,
    pub os: Option<String>,
    pub ssid: Option<String>,
    pub status: Option<String>,
    pub usage: Option<Usage>,
    pub notes: Option<String>,
}

/// Sent/received kilobytes over the lookback window.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Usage {
    pub sent: f64,
    pub recv: f64,
}

/// Response of the client policy endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPolicy {
    pub mac: Option<String>,
    pub device_policy: Option<String>,
}

impl ClientPolicy {
    /// True when the Dashboard confirmed the "Blocked" policy.
    pub fn is_blocked(&self) -> bool {
        self.device_policy.as_deref() == Some("Blocked")
    }
}

/// The operations the pipeline needs from the Dashboard.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Dashboard: Send + Sync {
    /// Fetch a single organization.
    async fn get_organization(&self, org_id: &str) -> Result<Organization, DashboardError>;

    /// List the networks of an organization, in API order.
    async fn get_networks(&self, org_id: &str) -> Result<Vec<Network>, DashboardError>;

    /// List clients seen on a network within the timespan, in API order.
    async fn get_network_clients(
        &self,
        network_id: &str,
        timespan_secs: u64,
    ) -> Result<Vec<Client>, DashboardError>;

    /// Set the device policy for a client on a network.
    async fn update_client_policy(
        &self,
        network_id: &str,
        client_id: &str,
        policy: &str,
    ) -> Result<ClientPolicy, DashboardError>;
}

/// Real Dashboard implementation over HTTPS.
pub struct MerakiDashboard {
    http: HttpClient,
    base_url: String,
    api_key: SecureString,
}

impl MerakiDashboard {
    pub fn new(base_url: &str, api_key: SecureString) -> Result<Self, DashboardError> {
        if api_key.is_empty() {
            return Err(DashboardError::MissingApiKey);
        }
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(format!("macwatch/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Issue one request with bounded retries on transport errors, 429 and
    /// 5xx responses. Returns the body plus the `rel=next` pagination link.
    async fn request_with_retry(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<(String, Option<String>), DashboardError> {
        let mut last_error = String::new();

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = RETRY_DELAY_MS * (1 << (attempt - 1));
                debug!("Retry {} after {}ms for {}", attempt, delay, url);
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            let mut request = self
                .http
                .request(method.clone(), url)
                .bearer_auth(self.api_key.as_str());
            if let Some(json) = body {
                request = request.json(json);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let next = response
                            .headers()
                            .get(LINK)
                            .and_then(|v| v.to_str().ok())
                            .and_then(parse_next_link);
                        let text = response.text().await?;
                        return Ok((text, next));
                    }

                    let retryable =
                        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
                    let message = response.text().await.unwrap_or_default();
                    if !retryable {
                        return Err(DashboardError::Api {
                            status: status.as_u16(),
                            message: truncate_body(&message),
                        });
                    }
                    warn!("HTTP {} from {}, retrying", status, url);
                    last_error = format!("HTTP {}", status);
                }
                Err(e) => {
                    last_error = e.to_string();
                }
            }
        }

        Err(DashboardError::RetriesExhausted {
            attempts: MAX_RETRIES,
            message: last_error,
        })
    }

    /// GET every page of a list endpoint, following `Link: rel=next`.
    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        first_url: String,
    ) -> Result<Vec<T>, DashboardError> {
        let mut items = Vec::new();
        let mut url = Some(first_url);

        while let Some(page_url) = url.take() {
            let (body, next) = self.request_with_retry(Method::GET, &page_url, None).await?;
            let page: Vec<T> = serde_json::from_str(&body).map_err(|e| DashboardError::Api {
                status: 200,
                message: format!("Unexpected response shape: {}", e),
            })?;
            items.extend(page);
            url = next;
        }

        Ok(items)
    }
}

#[async_trait]
impl Dashboard for MerakiDashboard {
    async fn get_organization(&self, org_id: &str) -> Result<Organization, DashboardError> {
        let url = format!("{}/organizations/{}", self.base_url, org_id);
        let (body, _) = self.request_with_retry(Method::GET, &url, None).await?;
        serde_json::from_str(&body).map_err(|e| DashboardError::Api {
            status: 200,
            message: format!("Unexpected response shape: {}", e),
        })
    }

    async fn get_networks(&self, org_id: &str) -> Result<Vec<Network>, DashboardError> {
        let url = format!(
            "{}/organizations/{}/networks?perPage={}",
            self.base_url, org_id, PER_PAGE
        );
        self.get_all_pages(url).await
    }

    async fn get_network_clients(
        &self,
        network_id: &str,
        timespan_secs: u64,
    ) -> Result<Vec<Client>, DashboardError> {
        let url = format!(
            "{}/networks/{}/clients?timespan={}&perPage={}",
            self.base_url, network_id, timespan_secs, PER_PAGE
        );
        self.get_all_pages(url).await
    }

    async fn update_client_policy(
        &self,
        network_id: &str,
        client_id: &str,
        policy: &str,
    ) -> Result<ClientPolicy, DashboardError> {
        let url = format!(
            "{}/networks/{}/clients/{}/policy",
            self.base_url, network_id, client_id
        );
        let body = serde_json::json!({ "devicePolicy": policy });
        let (text, _) = self
            .request_with_retry(Method::PUT, &url, Some(&body))
            .await?;
        serde_json::from_str(&text).map_err(|e| DashboardError::Api {
            status: 200,
            message: format!("Unexpected response shape: {}", e),
        })
    }
}

/// Extract the `rel=next` URL from a Link header.
///
/// The Dashboard sends `<url>; rel=first, <url>; rel=next, <url>; rel=last`.
fn parse_next_link(header: &str) -> Option<String> {
    for part in header.split(',') {
        let mut sections = part.split(';');
        let url_section = sections.next()?.trim();
        let is_next = sections.any(|s| {
            let rel = s.trim();
            rel == "rel=next" || rel == "rel=\"next\""
        });
        if is_next {
            return Some(
                url_section
                    .trim_start_matches('<')
                    .trim_end_matches('>')
                    .to_string(),
            );
        }
    }
    None
}

/// Keep error bodies short enough for log lines.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // Back off to a char boundary so multibyte bodies slice cleanly.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
