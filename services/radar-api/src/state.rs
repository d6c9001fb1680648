//! Application state for the radar API.

use std::sync::Arc;
use std::time::{Duration, Instant};

use acquisition::{AcquisitionConfig, HttpProbe, RadarService};
use anyhow::Result;
use tracing::info;

/// Shared application state.
pub struct AppState {
    /// Never-failing source of the latest record.
    pub radar: RadarService,

    started_at: Instant,
}

impl AppState {
    pub fn new(radar: RadarService) -> Self {
        Self {
            radar,
            started_at: Instant::now(),
        }
    }

    /// Build state that probes upstream over HTTP.
    pub fn from_config(config: &AcquisitionConfig) -> Result<Self> {
        let probe = Arc::new(HttpProbe::new()?);
        let radar = RadarService::from_config(config, probe)?;

        info!(
            product = %config.product,
            candidates = config.candidates.len(),
            probe_timeout_secs = config.probe_timeout_secs,
            "Radar service configured"
        );
        Ok(Self::new(radar))
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
