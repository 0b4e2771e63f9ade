// ABOUTME: Error types for the FOG imaging service client.
// ABOUTME: Covers lookup misses, ambiguous matches, and HTTP failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FogError {
    #[error("host {0} not found")]
    HostNotFound(String),

    #[error("more than one host found for {shortname} ({count} matches)")]
    AmbiguousHost { shortname: String, count: u64 },

    #[error("no image found for {0}")]
    ImageNotFound(String),

    #[error("no task type named {0:?} exists")]
    TaskTypeNotFound(String),

    #[error("imaging service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("unparseable response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("request to imaging service failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, FogError>;
