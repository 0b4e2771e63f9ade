// ABOUTME: Library root for kiln - exposes the reimage workflow for reuse.
// ABOUTME: The CLI binary is in main.rs.

pub mod commands;
pub mod config;
pub mod deploy;
pub mod error;
pub mod fog;
pub mod inventory;
pub mod power;
pub mod retry;
pub mod ssh;
pub mod types;
