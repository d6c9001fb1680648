//! Radar record and frame handlers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics::{counter, histogram};
use renderer::raster;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::state::AppState;

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 700;
pub const MAX_DIMENSION: u32 = 4096;

/// Query parameters for the rendered frame.
///
/// Kept as strings so a malformed value gets the JSON error body rather
/// than the extractor's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub struct FrameParams {
    pub width: Option<String>,
    pub height: Option<String>,
}

impl FrameParams {
    pub fn dimensions(&self) -> Result<(u32, u32), ApiError> {
        Ok((
            parse_dimension("width", self.width.as_deref(), DEFAULT_WIDTH)?,
            parse_dimension("height", self.height.as_deref(), DEFAULT_HEIGHT)?,
        ))
    }
}

fn parse_dimension(name: &'static str, value: Option<&str>, default: u32) -> Result<u32, ApiError> {
    let Some(raw) = value else {
        return Ok(default);
    };

    match raw.trim().parse::<u32>() {
        Ok(v) if (1..=MAX_DIMENSION).contains(&v) => Ok(v),
        _ => Err(ApiError::InvalidDimension {
            name,
            value: raw.to_string(),
            max: MAX_DIMENSION,
        }),
    }
}

/// GET /api/radar/latest - The latest record. Always 200.
#[instrument(skip(state))]
pub async fn latest_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    counter!("radar_api_requests_total", "endpoint" => "latest").increment(1);

    let record = state.radar.get_latest().await;
    debug!(status = %record.status(), "Serving latest record");

    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-cache")],
        Json(record),
    )
        .into_response()
}

/// GET /api/radar/latest.png - The latest record drawn as a PNG frame.
#[instrument(skip(state))]
pub async fn latest_png_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<FrameParams>,
) -> Result<Response, ApiError> {
    counter!("radar_api_requests_total", "endpoint" => "latest_png").increment(1);
    let (width, height) = params.dimensions()?;

    let record = state.radar.get_latest().await;
    let status = record.status();

    let start = std::time::Instant::now();
    let png = tokio::task::spawn_blocking(move || {
        let ops = renderer::render(width, height, &record);
        raster::render_png(width, height, &ops)
    })
    .await
    .map_err(|e| ApiError::Task(e.to_string()))??;
    histogram!("radar_api_render_duration_seconds").record(start.elapsed().as_secs_f64());

    debug!(width, height, bytes = png.len(), "Rendered frame");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-cache"),
            (HeaderName::from_static("x-radar-status"), status.as_str()),
        ],
        png,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_default() {
        assert_eq!(FrameParams::default().dimensions().unwrap(), (1000, 700));
    }

    #[test]
    fn test_dimensions_parsed() {
        let params = FrameParams {
            width: Some("640".to_string()),
            height: Some(" 480 ".to_string()),
        };
        assert_eq!(params.dimensions().unwrap(), (640, 480));
    }

    #[test]
    fn test_dimensions_rejected() {
        for bad in ["0", "4097", "-5", "wide", ""] {
            let params = FrameParams {
                width: Some(bad.to_string()),
                height: None,
            };
            assert!(
                matches!(
                    params.dimensions(),
                    Err(ApiError::InvalidDimension { name: "width", .. })
                ),
                "accepted {:?}",
                bad
            );
        }
    }
}
