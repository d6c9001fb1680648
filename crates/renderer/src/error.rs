//! Error types for the rendering back-ends.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Surface must be at least 1x1 pixels, got {width}x{height}")]
    EmptySurface { width: u32, height: u32 },

    #[error("Failed to parse generated SVG: {0}")]
    Svg(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
