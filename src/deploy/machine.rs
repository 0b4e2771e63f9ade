// ABOUTME: Generic reimage struct parameterized by state marker.
// ABOUTME: State types carry the remote ids for compile-time guarantees.

use crate::types::{HostId, ImageId, MachineName, OsSpec, TaskId};

use super::state::{
    HostLocated, ImageAssigned, Initialized, PowerCycled, Ready, TaskCompleted, TaskScheduled,
};

/// One reimage run for one machine, parameterized by its current state.
///
/// The state type parameter `S` carries the remote ids (host, image, task)
/// that earlier transitions resolved, so later steps cannot run without
/// them. Everything here is scoped to a single run; nothing persists.
#[derive(Debug)]
pub struct Reimage<S> {
    pub(crate) machine: MachineName,
    pub(crate) os: OsSpec,
    pub(crate) state: S,
}

impl Reimage<Initialized> {
    pub fn new(machine: MachineName, os: OsSpec) -> Self {
        Reimage {
            machine,
            os,
            state: Initialized,
        }
    }
}

impl<S> Reimage<S> {
    /// The target machine.
    pub fn machine(&self) -> &MachineName {
        &self.machine
    }

    /// The requested OS.
    pub fn os(&self) -> &OsSpec {
        &self.os
    }

    /// Teardown is intentionally a no-op: machines are left as-is, there
    /// is no reverse of imaging. Never touches the network or the machine.
    pub fn destroy(self) {}
}

// State-specific accessors for the resolved ids

impl Reimage<HostLocated> {
    pub fn host_id(&self) -> HostId {
        self.state.host
    }
}

impl Reimage<ImageAssigned> {
    pub fn host_id(&self) -> HostId {
        self.state.host
    }

    pub fn image_id(&self) -> ImageId {
        self.state.image
    }
}

impl Reimage<TaskScheduled> {
    pub fn host_id(&self) -> HostId {
        self.state.host
    }

    pub fn task_id(&self) -> TaskId {
        self.state.task
    }
}

impl Reimage<PowerCycled> {
    pub fn task_id(&self) -> TaskId {
        self.state.task
    }
}

impl Reimage<TaskCompleted> {
    pub fn host_id(&self) -> HostId {
        self.state.host
    }
}

impl Reimage<Ready> {
    pub fn host_id(&self) -> HostId {
        self.state.host
    }
}
