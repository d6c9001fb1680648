//! Common types shared across the radar services.

pub mod bounds;
pub mod error;
pub mod record;

pub use bounds::{GeoBounds, LatLon};
pub use error::{BoundsError, RecordError};
pub use record::{RadarRecord, RadarStatus, DEFAULT_PRODUCT};
