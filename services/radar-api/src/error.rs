//! API error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use renderer::RenderError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid {name} '{value}': expected an integer between 1 and {max}")]
    InvalidDimension {
        name: &'static str,
        value: String,
        max: u32,
    },

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Render task failed: {0}")]
    Task(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidDimension { .. } => StatusCode::BAD_REQUEST,
            ApiError::Render(_) | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
