//! Error types for the viewer.

use std::path::PathBuf;

use renderer::RenderError;
use thiserror::Error;

/// Failure fetching a record from the radar API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server error: {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure writing a rendered frame to disk.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Render task failed: {0}")]
    Task(String),
}
