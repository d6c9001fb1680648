//! Liveness probes for candidate sources.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::error::ResolveError;

/// Why a candidate was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unreachable {
    #[error("timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("connection failed: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable,
    Unreachable(Unreachable),
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable)
    }

    /// Label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ProbeOutcome::Reachable => "reachable",
            ProbeOutcome::Unreachable(Unreachable::Timeout) => "timeout",
            ProbeOutcome::Unreachable(Unreachable::Status(_)) => "status",
            ProbeOutcome::Unreachable(Unreachable::Transport(_)) => "transport",
        }
    }
}

/// A lightweight existence check against one URL.
///
/// Implementations must not fail: every problem is an
/// [`Unreachable`] reason. They should honour `timeout`, although the
/// resolver enforces it independently.
#[async_trait]
pub trait SourceProbe: Send + Sync {
    async fn probe(&self, url: &Url, timeout: Duration) -> ProbeOutcome;
}

/// Probes over HTTP with `HEAD`, falling back to a one byte ranged `GET`
/// for servers that refuse `HEAD`.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new() -> Result<Self, ResolveError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("mrms-radar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ResolveError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SourceProbe for HttpProbe {
    #[instrument(skip(self), fields(url = %url))]
    async fn probe(&self, url: &Url, timeout: Duration) -> ProbeOutcome {
        let response = match self.client.head(url.clone()).timeout(timeout).send().await {
            Ok(r) => r,
            Err(e) => return transport_failure(e),
        };

        if response.status() != StatusCode::METHOD_NOT_ALLOWED {
            return status_outcome(response.status());
        }

        debug!("HEAD not allowed, retrying with ranged GET");
        match self
            .client
            .get(url.clone())
            .header(header::RANGE, "bytes=0-0")
            .timeout(timeout)
            .send()
            .await
        {
            Ok(r) => status_outcome(r.status()),
            Err(e) => transport_failure(e),
        }
    }
}

fn status_outcome(status: StatusCode) -> ProbeOutcome {
    if status.is_success() {
        ProbeOutcome::Reachable
    } else {
        ProbeOutcome::Unreachable(Unreachable::Status(status.as_u16()))
    }
}

fn transport_failure(e: reqwest::Error) -> ProbeOutcome {
    if e.is_timeout() {
        ProbeOutcome::Unreachable(Unreachable::Timeout)
    } else {
        ProbeOutcome::Unreachable(Unreachable::Transport(e.to_string()))
    }
}
