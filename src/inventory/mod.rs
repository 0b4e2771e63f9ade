// ABOUTME: Machine-type lookup against the external inventory service.
// ABOUTME: Resolves "which hardware class is this machine" before imaging.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("machine {0} not known to the inventory")]
    UnknownMachine(String),

    #[error("inventory returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("request to inventory failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Resolves a machine name to its machine type (hardware class).
///
/// The machine type picks which image variant applies; it is resolved once
/// per reimage run and treated as immutable afterwards.
#[async_trait]
pub trait MachineLocator: Send + Sync {
    async fn machine_type(&self, name: &str) -> Result<String, InventoryError>;
}

#[derive(Debug, Deserialize)]
struct NodeStatus {
    machine_type: String,
}

/// Inventory lookup over the lock server's node-status endpoint.
#[derive(Debug, Clone)]
pub struct HttpInventory {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpInventory {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MachineLocator for HttpInventory {
    async fn machine_type(&self, name: &str) -> Result<String, InventoryError> {
        let url = format!("{}/nodes/{}", self.endpoint, name);
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(name, status = status.as_u16(), body = %body,
                "inventory lookup failed");
            return Err(lookup_failure(name, status, body));
        }
        let node: NodeStatus = resp.json().await?;
        Ok(node.machine_type)
    }
}

/// A 404 means the machine is not in the inventory at all; anything else
/// is a fault of the service itself.
fn lookup_failure(name: &str, status: reqwest::StatusCode, body: String) -> InventoryError {
    if status == reqwest::StatusCode::NOT_FOUND {
        InventoryError::UnknownMachine(name.to_string())
    } else {
        InventoryError::Service {
            status: status.as_u16(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_means_unknown_machine() {
        let err = lookup_failure(
            "cephtest-042",
            reqwest::StatusCode::NOT_FOUND,
            String::new(),
        );
        assert!(matches!(
            err,
            InventoryError::UnknownMachine(name) if name == "cephtest-042"
        ));
    }

    #[test]
    fn other_failures_carry_status_and_body() {
        let err = lookup_failure(
            "cephtest-042",
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "db down".to_string(),
        );
        assert!(matches!(
            err,
            InventoryError::Service { status: 500, body } if body == "db down"
        ));
    }
}
