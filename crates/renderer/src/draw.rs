//! Declarative drawing operations.
//!
//! The renderer never touches a graphics context. It returns a list of
//! these operations in paint order; a back-end (SVG, raster, a browser
//! canvas) interprets them.

use serde::{Deserialize, Serialize};

/// Color value in RGBA format. Alpha is a 0.0..=1.0 opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::opaque(r, g, b))
    }

    /// Same hue with a different opacity.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb`, alpha dropped.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A point in surface pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Rgba, width: f64) -> Self {
        Self { color, width }
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Axis-aligned filled rectangle.
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    },
    /// Closed polygon, filled then optionally outlined.
    Polygon {
        points: Vec<Point>,
        fill: Rgba,
        stroke: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    /// Solid filled circle.
    Circle {
        center: Point,
        radius: f64,
        fill: Rgba,
    },
    Text {
        anchor: Point,
        text: String,
        color: Rgba,
        font_size: f64,
        align: TextAlign,
    },
    /// Circle filled with a radial gradient from `inner` at the center to
    /// `outer` at `radius`.
    RadialGradient {
        center: Point,
        radius: f64,
        inner: Rgba,
        outer: Rgba,
    },
}

impl DrawOp {
    pub fn name(&self) -> &'static str {
        match self {
            DrawOp::FillRect { .. } => "fill_rect",
            DrawOp::Polygon { .. } => "polygon",
            DrawOp::Line { .. } => "line",
            DrawOp::Circle { .. } => "circle",
            DrawOp::Text { .. } => "text",
            DrawOp::RadialGradient { .. } => "radial_gradient",
        }
    }
}
