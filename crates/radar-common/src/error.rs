//! Error types for radar-common.

use thiserror::Error;

/// A set of corner coordinates that does not describe a usable box.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    #[error("Coordinate is not a finite number: ({lat}, {lon})")]
    NonFinite { lat: f64, lon: f64 },

    #[error("Latitude out of range [-90, 90]: {0}")]
    LatitudeOutOfRange(f64),

    #[error("Longitude out of range [-180, 180]: {0}")]
    LongitudeOutOfRange(f64),

    #[error("Box is not axis-aligned: {0}")]
    NotAxisAligned(String),

    #[error("Box is degenerate: {0}")]
    Degenerate(String),
}

/// A radar record payload that breaks the live/synthetic invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("Record has neither a status nor a sample flag")]
    MissingStatus,

    #[error("Live record is missing its dataUrl")]
    MissingSourceUrl,

    #[error("{status} record must not carry a dataUrl")]
    UnexpectedSourceUrl { status: String },

    #[error("Sample flag {sample} contradicts status '{status}'")]
    ConflictingSampleFlag { status: String, sample: bool },

    #[error("Invalid bounds: {0}")]
    Bounds(#[from] BoundsError),
}
