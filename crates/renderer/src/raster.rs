//! Raster back-end: draw list -> SVG -> tiny-skia pixmap -> PNG.

use tracing::debug;

use crate::draw::DrawOp;
use crate::error::RenderError;
use crate::svg::to_svg;

/// Rasterise a draw list onto a new `width` x `height` pixmap.
///
/// Text is only drawn when usvg can resolve a font for it; the default
/// options carry an empty font database, so labels are skipped.
pub fn rasterize(width: u32, height: u32, ops: &[DrawOp]) -> Result<tiny_skia::Pixmap, RenderError> {
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RenderError::EmptySurface { width, height })?;

    let svg = to_svg(width, height, ops);
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(&svg, &opt).map_err(|e| RenderError::Svg(e.to_string()))?;

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    debug!(width, height, ops = ops.len(), "Rasterized draw list");
    Ok(pixmap)
}

/// Rasterise and encode as PNG.
pub fn render_png(width: u32, height: u32, ops: &[DrawOp]) -> Result<Vec<u8>, RenderError> {
    let pixmap = rasterize(width, height, ops)?;
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))
}
