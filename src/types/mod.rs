// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent id confusion at compile time.

mod id;
mod machine;

pub use id::{HostId, ImageId, TaskId, TaskTypeId};
pub use machine::{MachineName, MachineNameError, OsSpec};
