//! Error types for the acquisition crate.

use std::path::PathBuf;

use radar_common::BoundsError;
use thiserror::Error;

/// A failure of the resolution process itself, as opposed to a candidate
/// being unreachable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("Invalid candidate #{index} '{value}': {reason}")]
    InvalidCandidate {
        index: usize,
        value: String,
        reason: String,
    },

    #[error("Unsupported scheme '{scheme}' in candidate #{index}")]
    UnsupportedScheme { index: usize, scheme: String },

    #[error("Probe timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Probe task failed: {0}")]
    ProbeTask(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Errors loading or validating acquisition configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid bounds: {0}")]
    Bounds(#[from] BoundsError),
}
