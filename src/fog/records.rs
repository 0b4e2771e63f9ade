// ABOUTME: Wire types for the FOG JSON API.
// ABOUTME: Only the fields this crate reads are modeled.

use crate::types::{HostId, ImageId, TaskId, TaskTypeId};
use serde::Deserialize;

/// Timestamp format used by FOG's task listing (service-local clock).
pub const TASK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A host record from `/host/search/{shortname}`.
#[derive(Debug, Clone, Deserialize)]
pub struct HostRecord {
    pub id: HostId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct HostSearchResponse {
    pub count: u64,
    #[serde(default)]
    pub hosts: Vec<HostRecord>,
}

/// An image record from `/image/search/{key}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRecord {
    pub id: ImageId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageSearchResponse {
    pub count: u64,
    #[serde(default)]
    pub images: Vec<ImageRecord>,
}

/// A task-type record from `/tasktype/search/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskTypeRecord {
    pub id: TaskTypeId,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskTypeSearchResponse {
    #[serde(default)]
    pub tasktypes: Vec<TaskTypeRecord>,
}

/// An in-flight task from `/task/active`. Presence in this listing is the
/// only signal that a task is still running; once it drops out, it has
/// finished (FOG does not distinguish success from failure here).
#[derive(Debug, Clone, Deserialize)]
pub struct ActiveTask {
    pub id: TaskId,
    pub host: TaskHost,
    /// Creation time in [`TASK_TIME_FORMAT`], left unparsed until
    /// correlation so one malformed entry cannot poison the listing.
    #[serde(rename = "createdTime")]
    pub created_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskHost {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ActiveTasksResponse {
    #[serde(default)]
    pub tasks: Vec<ActiveTask>,
}
