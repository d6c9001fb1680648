//! HTTP client for the radar API.

use std::time::Duration;

use acquisition::RecordSource;
use async_trait::async_trait;
use chrono::Utc;
use radar_common::{GeoBounds, RadarRecord, DEFAULT_PRODUCT};
use reqwest::{Client, Url};
use tracing::{debug, instrument, warn};

use crate::error::ClientError;

const LATEST_PATH: &str = "api/radar/latest";

/// Fetches records from a running radar API.
///
/// As a [`RecordSource`] it never fails: a transport problem, a non-success
/// status or an undecodable body becomes an `error` record with CONUS
/// bounds, so there is always something to draw.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    latest_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("radar-viewer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            client,
            latest_url: latest_url(base_url)?,
        })
    }

    pub fn latest_url(&self) -> &Url {
        &self.latest_url
    }

    #[instrument(skip(self), fields(url = %self.latest_url))]
    pub async fn fetch(&self) -> Result<RadarRecord, ClientError> {
        let response = self
            .client
            .get(self.latest_url.clone())
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let record: RadarRecord = serde_json::from_slice(&body)?;

        debug!(status = %record.status(), "Fetched record");
        Ok(record)
    }
}

#[async_trait]
impl RecordSource for ApiClient {
    async fn latest(&self) -> RadarRecord {
        match self.fetch().await {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Radar API unavailable");
                RadarRecord::error(DEFAULT_PRODUCT, GeoBounds::conus(), Utc::now(), e.to_string())
            }
        }
    }
}

fn latest_url(base_url: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(LATEST_PATH).map_err(|e| invalid(e.to_string()))
}
