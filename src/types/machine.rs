// ABOUTME: Machine naming and OS selection types.
// ABOUTME: Derives the short host name and the FOG image search key.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineNameError {
    #[error("machine name cannot be empty")]
    Empty,
}

/// A target machine, addressed by its canonical (fully-qualified) name.
///
/// FOG tracks hosts by their short name, so the canonical name is
/// decanonicalized deterministically: an optional `user@` prefix is
/// stripped and only the first DNS label is kept
/// (`ubuntu@cephtest-042.front.example.com` -> `cephtest-042`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineName {
    canonical: String,
    short: String,
}

impl MachineName {
    pub fn new(name: &str) -> Result<Self, MachineNameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MachineNameError::Empty);
        }
        let without_user = match name.split_once('@') {
            Some((_, host)) => host,
            None => name,
        };
        let short = without_user
            .split('.')
            .next()
            .unwrap_or(without_user)
            .to_string();
        if short.is_empty() {
            return Err(MachineNameError::Empty);
        }
        Ok(Self {
            canonical: without_user.to_string(),
            short,
        })
    }

    /// The fully-qualified name, used for SSH and power control.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// The first DNS label, used to match FOG host records.
    pub fn short_name(&self) -> &str {
        &self.short
    }
}

impl std::fmt::Display for MachineName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical)
    }
}

/// The OS to put on a machine, plus the machine type the image is built
/// for. The machine type comes from the external inventory and is fixed
/// for the lifetime of one reimage run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OsSpec {
    pub machine_type: String,
    pub os_type: String,
    pub os_version: String,
}

impl OsSpec {
    pub fn new(
        machine_type: impl Into<String>,
        os_type: impl Into<String>,
        os_version: impl Into<String>,
    ) -> Self {
        Self {
            machine_type: machine_type.into(),
            os_type: os_type.into(),
            os_version: os_version.into(),
        }
    }

    /// The FOG image search key: `machinetype_ostype_osversion`, with the
    /// OS type lowercased. Must resolve to exactly one image record.
    pub fn image_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.machine_type,
            self.os_type.to_lowercase(),
            self.os_version
        )
    }
}

impl std::fmt::Display for OsSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.os_type, self.os_version, self.machine_type)
    }
}
