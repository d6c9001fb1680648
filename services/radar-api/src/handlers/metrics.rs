//! Prometheus metrics endpoint.

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::IntoResponse,
};
use metrics_exporter_prometheus::PrometheusHandle;

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(handle): Extension<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
}
