// ABOUTME: Command handlers wiring configuration to concrete collaborators.
// ABOUTME: The reimage command builds clients and runs the deploy workflow.

mod reimage;

pub use reimage::{reimage, resolve_machine_type, ReimageArgs};
