// ABOUTME: Reimage orchestration using the type state pattern.
// ABOUTME: Exports state markers, the Reimage struct, and the end-to-end driver.

mod error;
mod machine;
mod state;
mod transitions;

pub use error::DeployError;
pub use machine::Reimage;
pub use state::{
    HostLocated, ImageAssigned, Initialized, PowerCycled, Ready, TaskCompleted, TaskScheduled,
};

use crate::config::PollingConfig;
use crate::fog::ImagingService;
use crate::power::PowerControl;
use crate::ssh::Reachability;
use crate::types::{MachineName, OsSpec};

/// Drive one machine through the whole reimage workflow.
///
/// Blocks until the machine is reachable under its new image or one
/// terminal [`DeployError`] occurs; there is no partial success and no
/// resume. One call per machine; the caller must make sure no two runs
/// target the same machine at once.
pub async fn run<F, P, R>(
    machine: MachineName,
    os: OsSpec,
    fog: &F,
    power: &P,
    probe: &R,
    polling: &PollingConfig,
) -> Result<Reimage<Ready>, DeployError>
where
    F: ImagingService,
    P: PowerControl,
    R: Reachability,
{
    tracing::info!(%machine, %os, "starting reimage");
    let ready = Reimage::new(machine, os)
        .locate_host(fog)
        .await?
        .assign_image(fog)
        .await?
        .schedule(fog, polling.correlation_window)
        .await?
        .power_cycle(power)
        .await?
        .await_task(fog, polling.deploy_wait)
        .await?
        .await_reachable(probe, polling.reachable_wait)
        .await?;
    tracing::info!(machine = %ready.machine(), "reimage complete");
    Ok(ready)
}
