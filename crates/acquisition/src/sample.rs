//! Synthetic sample records.

use chrono::Utc;
use radar_common::{GeoBounds, RadarRecord, DEFAULT_PRODUCT};

const DEFAULT_REASON: &str = "sample data";

/// Builds sample-status records. Does no I/O and cannot fail.
#[derive(Debug, Clone)]
pub struct SampleSynthesizer {
    product: String,
    bounds: GeoBounds,
}

impl SampleSynthesizer {
    pub fn new(product: impl Into<String>, bounds: GeoBounds) -> Self {
        Self {
            product: product.into(),
            bounds,
        }
    }

    /// A sample record stamped with the current time.
    ///
    /// A blank `reason` is replaced so the record always explains itself.
    pub fn synthesize(&self, reason: &str) -> RadarRecord {
        let reason = reason.trim();
        let message = if reason.is_empty() { DEFAULT_REASON } else { reason };
        RadarRecord::sample(self.product.clone(), self.bounds, Utc::now(), message)
    }
}

impl Default for SampleSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_PRODUCT, GeoBounds::conus())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_common::RadarStatus;

    #[test]
    fn test_default_is_conus_sample() {
        let record = SampleSynthesizer::default().synthesize("offline");
        assert_eq!(record.status(), RadarStatus::Sample);
        assert_eq!(record.bounds(), &GeoBounds::conus());
        assert_eq!(record.product(), "RALA");
        assert_eq!(record.message(), Some("offline"));
        assert!(record.source_url().is_none());
    }

    #[test]
    fn test_blank_reason_replaced() {
        let record = SampleSynthesizer::default().synthesize("   ");
        assert_eq!(record.message(), Some(DEFAULT_REASON));
    }

    #[test]
    fn test_timestamp_is_current() {
        let before = Utc::now();
        let record = SampleSynthesizer::default().synthesize("x");
        assert!(record.timestamp() >= before);
        assert!(record.timestamp() <= Utc::now());
    }
}
