//! Block actions for matched clients.

use tracing::{info, warn};

use crate::dashboard::{Client, Dashboard};

/// Policy name that cuts a client's network access.
pub const BLOCKED_POLICY: &str = "Blocked";

/// Ask the Dashboard to block a client on a network.
///
/// Returns true only when the API confirms the policy change; any failure is
/// logged and yields false so the scan continues with the next client. The
/// call is idempotent: re-blocking an already blocked client succeeds.
pub async fn apply_block(api: &dyn Dashboard, network_id: &str, client: &Client) -> bool {
    match api
        .update_client_policy(network_id, &client.id, BLOCKED_POLICY)
        .await
    {
        Ok(policy) if policy.is_blocked() => {
            info!("Blocked client {} ({})", client.id, client.mac);
            true
        }
        Ok(policy) => {
            warn!(
                "Block not confirmed for client {} ({}): policy = {:?}",
                client.id, client.mac, policy.device_policy
            );
            false
        }
        Err(e) => {
            warn!("Failed to block client {} ({}): {}", client.id, client.mac, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{ClientPolicy, MockDashboard};
    use crate::error::DashboardError;

    fn client(id: &str, mac: &str) -> Client {
        Client {
            id: id.to_string(),
            mac: mac.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_confirmed_block() {
        let mut api = MockDashboard::new();
        api.expect_update_client_policy()
            .withf(|net, id, policy| net == "N_1" && id == "k1" && policy == "Blocked")
            .times(1)
            .returning(|_, _, _| {
                Ok(ClientPolicy {
                    mac: Some("aa:bb:cc:dd:ee:ff".to_string()),
                    device_policy: Some("Blocked".to_string()),
                })
            });

        assert!(apply_block(&api, "N_1", &client("k1", "aa:bb:cc:dd:ee:ff")).await);
    }

    #[tokio::test]
    async fn test_unconfirmed_policy_is_failure() {
        let mut api = MockDashboard::new();
        api.expect_update_client_policy().returning(|_, _, _| {
            Ok(ClientPolicy {
                mac: None,
                device_policy: Some("Normal".to_string()),
            })
        });

        assert!(!apply_block(&api, "N_1", &client("k1", "aa:bb:cc:dd:ee:ff")).await);
    }

    #[tokio::test]
    async fn test_api_error_is_failure() {
        let mut api = MockDashboard::new();
        api.expect_update_client_policy().returning(|_, _, _| {
            Err(DashboardError::Api {
                status: 403,
                message: "forbidden".to_string(),
            })
        });

        assert!(!apply_block(&api, "N_1", &client("k1", "aa:bb:cc:dd:ee:ff")).await);
    }
}
