// ABOUTME: Reimage state marker types for the type state pattern.
// ABOUTME: States carry the remote ids proven to exist by earlier transitions.

use crate::types::{HostId, ImageId, TaskId};

/// Initial state: nothing resolved yet.
/// Available actions: `locate_host()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Host located: exactly one FOG host record matched the short name.
/// Available actions: `assign_image()`
#[derive(Debug, Clone, Copy)]
pub struct HostLocated {
    pub(crate) host: HostId,
}

/// Image assigned: the host now points at the requested image.
/// Available actions: `schedule()`
#[derive(Debug, Clone, Copy)]
pub struct ImageAssigned {
    pub(crate) host: HostId,
    pub(crate) image: ImageId,
}

/// Task scheduled and correlated: we know which active task is ours.
/// Available actions: `power_cycle()`
#[derive(Debug, Clone, Copy)]
pub struct TaskScheduled {
    pub(crate) host: HostId,
    pub(crate) task: TaskId,
}

/// Power cycled: the machine was told to reboot into imaging.
/// Available actions: `await_task()`
#[derive(Debug, Clone, Copy)]
pub struct PowerCycled {
    pub(crate) host: HostId,
    pub(crate) task: TaskId,
}

/// Task completed: the deploy task left FOG's active listing.
/// Available actions: `await_reachable()`
#[derive(Debug, Clone, Copy)]
pub struct TaskCompleted {
    pub(crate) host: HostId,
}

/// Ready: the machine answers SSH under its new image. Terminal.
#[derive(Debug, Clone, Copy)]
pub struct Ready {
    pub(crate) host: HostId,
}
