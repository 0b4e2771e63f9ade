// ABOUTME: Power control for target machines via their BMC.
// ABOUTME: Fire-and-forget off/on triggers; booting is observed over SSH later.

use crate::types::MachineName;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum PowerError {
    #[error("ipmitool {action} against {bmc} exited with {status}: {stderr}")]
    CommandFailed {
        action: String,
        bmc: String,
        status: i32,
        stderr: String,
    },

    #[error("failed to run ipmitool: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Power triggers for a machine. Both calls return once the trigger is
/// accepted; neither waits for the machine to change state.
#[async_trait]
pub trait PowerControl: Send + Sync {
    async fn power_off(&self) -> Result<(), PowerError>;
    async fn power_on(&self) -> Result<(), PowerError>;
}

/// BMC addressing and credentials for [`IpmiPower`].
#[derive(Debug, Clone, Deserialize)]
pub struct IpmiConfig {
    /// Domain appended to the short machine name to reach its BMC
    /// (`cephtest-042` + `ipmi.example.com` -> `cephtest-042.ipmi.example.com`).
    pub domain: String,
    pub user: String,
    pub password: String,
}

/// Power control by shelling out to `ipmitool` against the machine's BMC.
pub struct IpmiPower {
    bmc: String,
    user: String,
    password: String,
}

impl IpmiPower {
    pub fn new(machine: &MachineName, config: &IpmiConfig) -> Self {
        Self {
            bmc: format!("{}.{}", machine.short_name(), config.domain),
            user: config.user.clone(),
            password: config.password.clone(),
        }
    }

    async fn chassis_power(&self, action: &str) -> Result<(), PowerError> {
        tracing::info!(bmc = %self.bmc, action, "sending chassis power command");
        let output = Command::new("ipmitool")
            .args(["-H", &self.bmc, "-U", &self.user, "-P", &self.password])
            .args(["chassis", "power", action])
            .output()
            .await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::error!(bmc = %self.bmc, action, %stderr, "chassis power command failed");
            return Err(PowerError::CommandFailed {
                action: action.to_string(),
                bmc: self.bmc.clone(),
                status: output.status.code().unwrap_or(-1),
                stderr,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PowerControl for IpmiPower {
    async fn power_off(&self) -> Result<(), PowerError> {
        self.chassis_power("off").await
    }

    async fn power_on(&self) -> Result<(), PowerError> {
        self.chassis_power("on").await
    }
}
