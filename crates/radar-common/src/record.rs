//! The radar record produced by every acquisition cycle.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bounds::GeoBounds;
use crate::error::RecordError;

/// Product label shown for Reflectivity at Lowest Altitude.
pub const DEFAULT_PRODUCT: &str = "RALA";

/// Where a record's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadarStatus {
    /// A reachable upstream source was found.
    Live,
    /// No source was reachable; content is synthetic.
    Sample,
    /// No usable record could be obtained at all.
    Error,
}

impl RadarStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RadarStatus::Live => "live",
            RadarStatus::Sample => "sample",
            RadarStatus::Error => "error",
        }
    }
}

impl fmt::Display for RadarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one acquisition attempt.
///
/// Fields are private so the live and synthetic states cannot be mixed:
/// only a live record carries a source URL, and only synthetic records
/// (sample/error) carry an explanatory message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RecordWire", try_from = "RecordWire")]
pub struct RadarRecord {
    status: RadarStatus,
    source_url: Option<String>,
    product: String,
    bounds: GeoBounds,
    timestamp: DateTime<Utc>,
    next_update: Option<DateTime<Utc>>,
    message: Option<String>,
}

impl RadarRecord {
    /// A record backed by a reachable upstream source.
    pub fn live(
        source_url: impl Into<String>,
        product: impl Into<String>,
        bounds: GeoBounds,
        timestamp: DateTime<Utc>,
        next_update: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            status: RadarStatus::Live,
            source_url: Some(source_url.into()),
            product: product.into(),
            bounds,
            timestamp,
            next_update,
            message: None,
        }
    }

    /// A synthetic record used when no source is reachable.
    pub fn sample(
        product: impl Into<String>,
        bounds: GeoBounds,
        timestamp: DateTime<Utc>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status: RadarStatus::Sample,
            source_url: None,
            product: product.into(),
            bounds,
            timestamp,
            next_update: None,
            message: Some(message.into()),
        }
    }

    /// A record for when nothing usable could be obtained.
    ///
    /// Still carries bounds so a consumer can draw the base map.
    pub fn error(
        product: impl Into<String>,
        bounds: GeoBounds,
        timestamp: DateTime<Utc>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status: RadarStatus::Error,
            source_url: None,
            product: product.into(),
            bounds,
            timestamp,
            next_update: None,
            message: Some(message.into()),
        }
    }

    pub fn status(&self) -> RadarStatus {
        self.status
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn next_update(&self) -> Option<DateTime<Utc>> {
        self.next_update
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_live(&self) -> bool {
        self.status == RadarStatus::Live
    }

    /// True for sample and error records.
    pub fn is_synthetic(&self) -> bool {
        !self.is_live()
    }

    /// One line of user-facing status text.
    pub fn status_line(&self) -> String {
        match self.status {
            RadarStatus::Live => "Live Data".to_string(),
            RadarStatus::Sample => match &self.message {
                Some(m) => format!("Using sample data - {}", m),
                None => "Using sample data - real MRMS data currently unavailable".to_string(),
            },
            RadarStatus::Error => {
                format!("Error: {}", self.message.as_deref().unwrap_or("unknown"))
            }
        }
    }
}

/// JSON shape of a record.
///
/// `sample` duplicates `status` for clients that only look at the flag;
/// a payload with just the flag (no `status`) is still accepted.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<RadarStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sample: Option<bool>,
    timestamp: DateTime<Utc>,
    product: String,
    bounds: GeoBounds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_update: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl From<RadarRecord> for RecordWire {
    fn from(r: RadarRecord) -> Self {
        Self {
            status: Some(r.status),
            sample: Some(r.status != RadarStatus::Live),
            timestamp: r.timestamp,
            product: r.product,
            bounds: r.bounds,
            data_url: r.source_url,
            next_update: r.next_update,
            message: r.message,
        }
    }
}

impl TryFrom<RecordWire> for RadarRecord {
    type Error = RecordError;

    fn try_from(w: RecordWire) -> Result<Self, Self::Error> {
        let status = match (w.status, w.sample) {
            (Some(status), None) => status,
            (Some(status), Some(sample)) => {
                if sample == (status == RadarStatus::Live) {
                    return Err(RecordError::ConflictingSampleFlag {
                        status: status.to_string(),
                        sample,
                    });
                }
                status
            }
            (None, Some(true)) => RadarStatus::Sample,
            (None, Some(false)) => RadarStatus::Live,
            (None, None) => return Err(RecordError::MissingStatus),
        };

        match (status, &w.data_url) {
            (RadarStatus::Live, None) => return Err(RecordError::MissingSourceUrl),
            (RadarStatus::Sample | RadarStatus::Error, Some(_)) => {
                return Err(RecordError::UnexpectedSourceUrl {
                    status: status.to_string(),
                })
            }
            _ => {}
        }

        Ok(Self {
            status,
            source_url: w.data_url,
            product: w.product,
            bounds: w.bounds,
            timestamp: w.timestamp,
            next_update: w.next_update,
            message: w.message,
        })
    }
}
