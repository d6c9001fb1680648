//! MRMS Radar API
//!
//! HTTP surface over [`acquisition::RadarService`]: the latest radar record
//! as JSON, the rendered frame as PNG, health and Prometheus metrics.

pub mod error;
pub mod handlers;
pub mod state;

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router.
///
/// `/metrics` is only mounted when a Prometheus recorder is installed.
pub fn build_router(state: Arc<AppState>, prometheus: Option<PrometheusHandle>) -> Router {
    let mut app = Router::new()
        .route("/", get(handlers::health::root_handler))
        // Health
        .route("/api/health", get(handlers::health::health_handler))
        // Radar
        .route("/api/radar/latest", get(handlers::radar::latest_handler))
        .route(
            "/api/radar/latest.png",
            get(handlers::radar::latest_png_handler),
        );

    if let Some(handle) = prometheus {
        app = app.route(
            "/metrics",
            get(handlers::metrics::metrics_handler).layer(Extension(handle)),
        );
    }

    app.layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

/// Listen address from a bare host IP and a port. IPv6 hosts may be given
/// with or without brackets.
pub fn listen_addr(host: &str, port: u16) -> Result<SocketAddr, AddrParseError> {
    let host = host.trim();
    let ip: IpAddr = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
        .parse()?;
    Ok(SocketAddr::new(ip, port))
}
