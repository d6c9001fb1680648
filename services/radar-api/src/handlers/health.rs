//! Landing and health handlers.

use std::sync::Arc;

use axum::{extract::Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "MRMS Radar API";

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
    pub uptime_secs: u64,
}

/// GET / - Landing message
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: SERVICE_NAME,
    })
}

/// GET /api/health - Liveness check. Does not touch upstream.
pub async fn health_handler(Extension(state): Extension<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        service: SERVICE_NAME,
        status: "ok",
        message: "Server is running",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        uptime_secs: state.uptime().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_handler() {
        let response = root_handler().await;
        assert_eq!(response.message, "MRMS Radar API");
    }
}
