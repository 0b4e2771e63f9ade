// ABOUTME: FOG imaging service integration.
// ABOUTME: Capability trait, HTTP client, wire records, and task correlation.

mod client;
pub mod correlate;
mod error;
mod records;

pub use client::FogClient;
pub use error::{FogError, Result};
pub use records::{
    ActiveTask, HostRecord, ImageRecord, TaskHost, TaskTypeRecord, TASK_TIME_FORMAT,
};

use crate::types::{HostId, ImageId, OsSpec};
use async_trait::async_trait;

/// The five imaging-service operations the reimage workflow needs.
///
/// Implemented by [`FogClient`]; a seam so the orchestrator can be tested
/// against fakes.
#[async_trait]
pub trait ImagingService: Send + Sync {
    /// Resolve a short host name to exactly one host record.
    ///
    /// # Errors
    ///
    /// `FogError::HostNotFound` on zero matches, `FogError::AmbiguousHost`
    /// on more than one.
    async fn find_host(&self, short_name: &str) -> Result<HostRecord>;

    /// Resolve an OS spec to an image record (first match wins).
    ///
    /// # Errors
    ///
    /// `FogError::ImageNotFound` when nothing matches the image key.
    async fn find_image(&self, os: &OsSpec) -> Result<ImageRecord>;

    /// Point a host at an image. Idempotent.
    async fn assign_image(&self, host: HostId, image: ImageId) -> Result<()>;

    /// Schedule a deploy task for a host. The service does not return the
    /// created task's id; use [`correlate::match_scheduled_task`] on
    /// [`list_active_tasks`](Self::list_active_tasks) to discover it.
    async fn schedule_deploy_task(&self, host: HostId) -> Result<()>;

    /// All currently-active tasks, in service order (not meaningful).
    /// A task absent from this listing has finished, successfully or not.
    async fn list_active_tasks(&self) -> Result<Vec<ActiveTask>>;
}
