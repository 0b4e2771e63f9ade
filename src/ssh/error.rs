// ABOUTME: SSH-specific error types.
// ABOUTME: Classifies which failures are transient during post-reimage boot.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("connection attempt timed out after {0:?}")]
    ConnectTimeout(Duration),

    #[error("authentication failed: no valid credentials")]
    AuthenticationFailed,

    #[error("SSH agent not available: {0}")]
    AgentUnavailable(String),

    #[error("failed to load key from {path}: {reason}")]
    KeyLoadFailed { path: PathBuf, reason: String },

    #[error("server host key rejected")]
    HostKeyRejected,

    #[error("SSH protocol error: {0}")]
    Protocol(#[from] russh::Error),

    #[error("SSH key error: {0}")]
    Key(#[from] russh::keys::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this failure is expected while a freshly imaged machine is
    /// still booting, and should therefore be treated as "not ready yet"
    /// by a reachability poll rather than surfaced.
    ///
    /// Refused or unroutable connections and connect timeouts mean sshd is
    /// not up; authentication failures happen in the window where sshd
    /// answers before user provisioning has run. Everything else (bad
    /// local credentials, protocol mismatches, rejected host keys) will
    /// not fix itself by waiting.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Connection(_) | Error::ConnectTimeout(_) | Error::AuthenticationFailed
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
