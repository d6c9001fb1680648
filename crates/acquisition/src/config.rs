//! Acquisition configuration.
//!
//! Loaded from `sources.yaml` in the config directory. Every field has a
//! default, so a missing file or a partial file is fine.

use std::path::Path;
use std::time::Duration;

use radar_common::{GeoBounds, DEFAULT_PRODUCT};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;

pub const SOURCES_FILE: &str = "sources.yaml";

/// Where and how to look for a live feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionConfig {
    #[serde(default = "default_product")]
    pub product: String,

    /// Probed in order; the first reachable one wins.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,

    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Optional cap on the whole scan.
    #[serde(default)]
    pub overall_deadline_secs: Option<u64>,

    /// How often upstream publishes; used for `nextUpdate`.
    #[serde(default = "default_update_interval_secs")]
    pub update_interval_secs: u64,

    /// Coverage area. CONUS when absent.
    #[serde(default)]
    pub bounds: Option<BoundsExtent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsExtent {
    pub north: f64,
    pub south: f64,
    pub west: f64,
    pub east: f64,
}

fn default_product() -> String {
    DEFAULT_PRODUCT.to_string()
}

fn default_candidates() -> Vec<String> {
    vec![
        "https://mrms.ncep.noaa.gov/data/2D/ReflectivityAtLowestAltitude/MRMS_ReflectivityAtLowestAltitude.latest.grib2.gz".to_string(),
        "https://mrms.ncep.noaa.gov/data/2D/ReflectivityAtLowestAltitude/".to_string(),
        "https://noaa-mrms-pds.s3.amazonaws.com/?list-type=2&prefix=CONUS/ReflectivityAtLowestAltitude_00.50/&max-keys=1".to_string(),
    ]
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_update_interval_secs() -> u64 {
    120
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            product: default_product(),
            candidates: default_candidates(),
            probe_timeout_secs: default_probe_timeout_secs(),
            overall_deadline_secs: None,
            update_interval_secs: default_update_interval_secs(),
            bounds: None,
        }
    }
}

impl AcquisitionConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AcquisitionConfig =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        debug!(
            path = %path.display(),
            candidates = config.candidates.len(),
            "Loaded acquisition config"
        );
        Ok(config)
    }

    /// Load `sources.yaml` from `config_dir`, falling back to defaults
    /// when the file does not exist.
    pub fn load_from_dir(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(SOURCES_FILE);
        if !path.exists() {
            warn!(path = %path.display(), "Sources config not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "probe_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.update_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "update_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.overall_deadline_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "overall_deadline_secs must be greater than zero when set".to_string(),
            ));
        }
        if self.product.trim().is_empty() {
            return Err(ConfigError::Invalid("product must not be empty".to_string()));
        }
        self.geo_bounds()?;
        Ok(())
    }

    pub fn geo_bounds(&self) -> Result<GeoBounds, ConfigError> {
        match self.bounds {
            Some(b) => Ok(GeoBounds::from_extent(b.north, b.south, b.west, b.east)?),
            None => Ok(GeoBounds::conus()),
        }
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn overall_deadline(&self) -> Option<Duration> {
        self.overall_deadline_secs.map(Duration::from_secs)
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }
}
