// ABOUTME: Error types for the reimage workflow.
// ABOUTME: One variant per terminal failure; lookup failures are never retried.

use crate::fog::FogError;
use crate::power::PowerError;
use crate::types::TaskId;

/// Terminal failures of a reimage run.
///
/// Lookup and scheduling failures are configuration problems and fail
/// fast; only the two waits (`TaskTimedOut`, `ReachabilityTimedOut`) sit
/// behind retry budgets.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Host search failed or was ambiguous.
    #[error("host lookup for {host} failed: {source}")]
    HostLookup {
        host: String,
        #[source]
        source: FogError,
    },

    /// Image search or assignment failed. A missing image is a
    /// configuration error, not something transient.
    #[error("image setup for {image_key} failed: {source}")]
    ImageLookup {
        image_key: String,
        #[source]
        source: FogError,
    },

    /// Scheduling the deploy task (or listing tasks right after) failed.
    #[error("scheduling deploy task for {host} failed: {source}")]
    Schedule {
        host: String,
        #[source]
        source: FogError,
    },

    /// No active task matched the deploy just scheduled. Fatal: waiting
    /// on an unknown task id would be meaningless.
    #[error("no active task matched the deploy just scheduled for {host}")]
    Correlation { host: String },

    /// The power-cycle trigger failed.
    #[error("power cycle of {host} failed: {source}")]
    Power {
        host: String,
        #[source]
        source: PowerError,
    },

    /// The deploy task never left the active listing.
    #[error("deploy task {task} still active after {attempts} polls")]
    TaskTimedOut { task: TaskId, attempts: u32 },

    /// The imaging service failed while the task wait was polling it.
    #[error("imaging service failed during the deploy task wait: {0}")]
    Service(#[source] FogError),

    /// The machine never accepted a management connection after imaging.
    #[error("{host} not reachable after {attempts} connection attempts")]
    ReachabilityTimedOut { host: String, attempts: u32 },

    /// A non-transient SSH failure during the reachability wait, one that
    /// waiting longer cannot fix (bad local credentials, protocol errors).
    #[error("cannot probe {host}: {source}")]
    Unreachable {
        host: String,
        #[source]
        source: crate::ssh::Error,
    },
}
