// ABOUTME: SSH connectivity: session management and the reachability probe.
// ABOUTME: A machine counts as reimaged once a management session succeeds.

mod client;
mod error;

pub use client::{HostKeyPolicy, Session, SessionConfig};
pub use error::{Error, Result};

use async_trait::async_trait;

/// Attempts a management connection to the target machine.
///
/// Used purely as an "is it back up" signal after reimaging; no commands
/// are ever run through it.
#[async_trait]
pub trait Reachability: Send + Sync {
    async fn probe(&self) -> Result<()>;
}

/// Probe that opens an SSH session and immediately closes it.
#[derive(Debug, Clone)]
pub struct SshProber {
    config: SessionConfig,
}

impl SshProber {
    /// The machine's host key is regenerated by the image install, so the
    /// probe must not pin it.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config: config.host_key_policy(HostKeyPolicy::AcceptAny),
        }
    }
}

#[async_trait]
impl Reachability for SshProber {
    async fn probe(&self) -> Result<()> {
        let session = Session::connect(self.config.clone()).await?;
        // A clean disconnect failure still means the machine answered;
        // don't let it fail the probe.
        if let Err(err) = session.disconnect().await {
            tracing::debug!(%err, "disconnect after successful probe failed");
        }
        Ok(())
    }
}
