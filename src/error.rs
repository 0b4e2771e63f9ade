// ABOUTME: Application-wide error types for kiln.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("no machine type for {0}: pass --machine-type or configure an inventory endpoint")]
    NoMachineType(String),

    #[error("invalid machine name: {0}")]
    MachineName(#[from] crate::types::MachineNameError),

    #[error(transparent)]
    Inventory(#[from] crate::inventory::InventoryError),

    #[error(transparent)]
    Deploy(#[from] crate::deploy::DeployError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
