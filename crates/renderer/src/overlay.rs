//! Precipitation overlay.
//!
//! Radar payloads are never decoded, so the overlay is always the fixed
//! demonstration layout below whether the record is live or sample.

use std::fmt;

use serde::{Deserialize, Serialize};

use radar_common::RadarRecord;

use crate::draw::{DrawOp, Point, Rgba};

/// Reflectivity intensity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    Moderate,
    Heavy,
    Severe,
}

/// Gradient endpoints for one intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityColors {
    pub inner: Rgba,
    pub outer: Rgba,
}

impl Intensity {
    pub const ALL: [Intensity; 4] = [
        Intensity::Light,
        Intensity::Moderate,
        Intensity::Heavy,
        Intensity::Severe,
    ];

    /// Color table: light green, moderate yellow, heavy orange, severe red.
    /// Inner stops are more opaque than outer stops.
    pub fn colors(&self) -> IntensityColors {
        let (hue, inner_a, outer_a) = match self {
            Intensity::Light => (Rgba::opaque(34, 197, 94), 0.4, 0.1),
            Intensity::Moderate => (Rgba::opaque(234, 179, 8), 0.5, 0.15),
            Intensity::Heavy => (Rgba::opaque(249, 115, 22), 0.6, 0.2),
            Intensity::Severe => (Rgba::opaque(239, 68, 68), 0.7, 0.25),
        };
        IntensityColors {
            inner: hue.with_alpha(inner_a),
            outer: hue.with_alpha(outer_a),
        }
    }

    /// Legend text with the reflectivity range in dBZ.
    pub fn legend_label(&self) -> &'static str {
        match self {
            Intensity::Light => "Light (0-20 dBZ)",
            Intensity::Moderate => "Moderate (20-40 dBZ)",
            Intensity::Heavy => "Heavy (40-55 dBZ)",
            Intensity::Severe => "Severe (55+ dBZ)",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intensity::Light => "light",
            Intensity::Moderate => "moderate",
            Intensity::Heavy => "heavy",
            Intensity::Severe => "severe",
        };
        f.write_str(s)
    }
}

/// A precipitation cell in surface coordinates. Rebuilt on every draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecipitationArea {
    pub center: Point,
    pub radius: f64,
    pub intensity: Intensity,
}

impl PrecipitationArea {
    pub fn to_op(&self) -> DrawOp {
        let colors = self.intensity.colors();
        DrawOp::RadialGradient {
            center: self.center,
            radius: self.radius,
            inner: colors.inner,
            outer: colors.outer,
        }
    }
}

/// Demonstration layout: (x fraction, y fraction, radius px, intensity).
pub const SAMPLE_LAYOUT: [(f64, f64, f64, Intensity); 4] = [
    (0.2, 0.25, 60.0, Intensity::Light),
    (0.5, 0.4, 80.0, Intensity::Moderate),
    (0.7, 0.6, 100.0, Intensity::Heavy),
    (0.75, 0.8, 70.0, Intensity::Severe),
];

/// Precipitation areas for a surface. The record is accepted so real
/// decoded cells can be placed through its bounds later; today the layout
/// is the same for every record.
pub fn precipitation_areas(width: f64, height: f64, _record: &RadarRecord) -> Vec<PrecipitationArea> {
    SAMPLE_LAYOUT
        .iter()
        .map(|&(fx, fy, radius, intensity)| PrecipitationArea {
            center: Point::new(width * fx, height * fy),
            radius,
            intensity,
        })
        .collect()
}

/// Draw the overlay layer.
pub fn overlay(width: f64, height: f64, record: &RadarRecord) -> Vec<DrawOp> {
    precipitation_areas(width, height, record)
        .iter()
        .map(PrecipitationArea::to_op)
        .collect()
}
