//! Radar frame rendering.
//!
//! [`render`] turns a radar record into an ordered list of [`DrawOp`]s:
//! the base map first, then the precipitation overlay. It is a pure
//! function; the [`svg`] and [`raster`] modules interpret the list.

pub mod basemap;
pub mod draw;
pub mod error;
pub mod overlay;
pub mod raster;
pub mod svg;

pub use draw::{DrawOp, Point, Rgba, Stroke, TextAlign};
pub use error::RenderError;
pub use overlay::{Intensity, PrecipitationArea};

use radar_common::RadarRecord;

/// Draw a full frame for a `width` x `height` surface.
///
/// The same arguments always yield the same list. The base layer is
/// always present regardless of the record's status.
pub fn render(width: u32, height: u32, record: &RadarRecord) -> Vec<DrawOp> {
    let (w, h) = (width as f64, height as f64);
    let mut ops = basemap::base_map(w, h);
    ops.extend(overlay::overlay(w, h, record));
    ops
}
