// ABOUTME: The reimage command: resolve the machine, then run the workflow.
// ABOUTME: Builds FOG client, power control, and SSH prober from config.

use crate::config::Config;
use crate::deploy;
use crate::error::{Error, Result};
use crate::fog::FogClient;
use crate::inventory::{HttpInventory, MachineLocator};
use crate::power::IpmiPower;
use crate::ssh::{SessionConfig, SshProber};
use crate::types::{MachineName, OsSpec};

#[derive(Debug, Clone)]
pub struct ReimageArgs {
    pub machine: String,
    pub os_type: String,
    pub os_version: String,
    /// Skips the inventory lookup when given.
    pub machine_type: Option<String>,
}

/// Reimage one machine and block until it is reachable again.
pub async fn reimage(config: &Config, args: ReimageArgs) -> Result<()> {
    let machine = MachineName::new(&args.machine)?;
    let inventory = config
        .inventory
        .as_ref()
        .map(|inv| HttpInventory::new(&inv.endpoint));
    let machine_type = resolve_machine_type(inventory.as_ref(), &machine, args.machine_type).await?;
    let os = OsSpec::new(machine_type, args.os_type, args.os_version);

    let fog = FogClient::new(
        &config.fog.endpoint,
        &config.fog.api_token,
        &config.fog.user_token,
    );
    let power = IpmiPower::new(&machine, &config.ipmi);
    let mut session = SessionConfig::new(machine.canonical(), &config.ssh.user)
        .port(config.ssh.port)
        .connect_timeout(config.ssh.connect_timeout);
    if let Some(key_path) = &config.ssh.key_path {
        session = session.key_path(key_path);
    }
    let probe = SshProber::new(session);

    deploy::run(machine, os, &fog, &power, &probe, &config.polling).await?;
    Ok(())
}

/// Pick the machine type for a run: an explicit flag wins outright, then
/// the inventory is asked, and with neither the run cannot continue.
pub async fn resolve_machine_type<L: MachineLocator>(
    inventory: Option<&L>,
    machine: &MachineName,
    explicit: Option<String>,
) -> Result<String> {
    if let Some(machine_type) = explicit {
        return Ok(machine_type);
    }
    let Some(locator) = inventory else {
        return Err(Error::NoMachineType(machine.to_string()));
    };
    let machine_type = locator.machine_type(machine.short_name()).await?;
    tracing::debug!(machine = %machine, %machine_type, "resolved machine type from inventory");
    Ok(machine_type)
}
