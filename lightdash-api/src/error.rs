//! Errors returned by `LightdashClient` and the local collections
//!
use std::path::PathBuf;

use snafu::prelude::*;

/// Errors returned by lightdash crate
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum LightdashError {
    /// Network-level failure: dns, connection refused, tls, or request timeout.
    /// The underlying `reqwest::Error` is propagated unchanged.
    #[snafu(display("HTTP transport error {method} url:{url}"))]
    Transport {
        method: String,
        url: String,
        source: reqwest::Error,
    },

    /// Lightdash server responded with a non-2xx status.
    #[snafu(display("Lightdash API error: {status} {status_text} ({url})"))]
    Remote {
        status: u16,
        status_text: String,
        url: String,
        message: String,
    },

    /// No api key was configured.
    #[snafu(display("Authentication failed: {message}"))]
    Auth { message: String },

    /// Deserialization error. The response body did not match the expected shape.
    #[snafu(display("Deserialization: {source}"))]
    Deserialization { source: serde_json::Error },

    /// Serialization error. unlikely to occur. If you see this error, please report it as a bug.
    #[snafu(display("Serialization: {source}"))]
    Serialization { source: serde_json::Error },

    /// Expected item was not found, for example a search result uuid or dashboard set id.
    #[snafu(display("{obj_type} {key} not found"))]
    NotFound { obj_type: String, key: String },

    /// Validation error: an input check failed (for example, a blank set name).
    #[snafu(display("Validation error: {message}"))]
    Validation { message: String },

    /// Error encountered by the configured `KeyValueStore`.
    #[snafu(display("Storage: {source}"))]
    Storage { source: StorageError },

    /// Some other error occurred
    #[snafu(display("{message}"))]
    Other { message: String },
}

impl LightdashError {
    /// Returns the http status code for `Remote` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the error came from the network layer rather than the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Errors arising from local persistence
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StorageError {
    /// Problem reading or writing a stored blob
    #[snafu(display("storage file {path:?} {source}"))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Stored payload could not be parsed.
    /// Collections recover from this by deleting the record and starting empty.
    #[snafu(display("malformed stored value for key {key}: {source}"))]
    Malformed {
        key: String,
        source: serde_json::Error,
    },

    #[snafu(display("storage configuration error: {message}"))]
    Config { message: String },
}

impl From<StorageError> for LightdashError {
    fn from(source: StorageError) -> Self {
        Self::Storage { source }
    }
}
