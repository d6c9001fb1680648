//! Stylized base map: background, landmass, coordinate grid and reference
//! points.
//!
//! All geometry is expressed as fractions of the surface so the map scales
//! to any size. Nothing here depends on the radar record.

use crate::draw::{DrawOp, Point, Rgba, Stroke, TextAlign};

pub const BACKGROUND: Rgba = Rgba::opaque(0x1e, 0x3a, 0x8a);
pub const LAND_FILL: Rgba = Rgba::opaque(0x1e, 0x29, 0x3b);
pub const LAND_OUTLINE: Stroke = Stroke::new(Rgba::opaque(0x47, 0x55, 0x69), 2.0);
pub const GRID_LINE: Stroke = Stroke::new(Rgba::new(255, 255, 255, 0.1), 1.0);
pub const MARKER_COLOR: Rgba = Rgba::opaque(0x94, 0xa3, 0xb8);

pub const GRID_COLUMNS: u32 = 8;
pub const GRID_ROWS: u32 = 6;

const MARKER_RADIUS: f64 = 3.0;
const LABEL_FONT_SIZE: f64 = 12.0;
const LABEL_OFFSET: f64 = 8.0;

/// Landmass outline as (x, y) fractions, clockwise from the north-west.
pub const LANDMASS: [(f64, f64); 4] = [(0.15, 0.15), (0.85, 0.15), (0.75, 0.85), (0.25, 0.85)];

/// A named location drawn on the base map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    pub name: &'static str,
    pub x: f64,
    pub y: f64,
}

pub const REFERENCE_POINTS: [ReferencePoint; 6] = [
    ReferencePoint { name: "Seattle", x: 0.2, y: 0.25 },
    ReferencePoint { name: "Chicago", x: 0.5, y: 0.4 },
    ReferencePoint { name: "NYC", x: 0.8, y: 0.35 },
    ReferencePoint { name: "Miami", x: 0.7, y: 0.8 },
    ReferencePoint { name: "LA", x: 0.1, y: 0.6 },
    ReferencePoint { name: "Denver", x: 0.35, y: 0.5 },
];

/// Draw the base layer for a `width` x `height` surface.
pub fn base_map(width: f64, height: f64) -> Vec<DrawOp> {
    let mut ops = Vec::with_capacity(
        2 + (GRID_COLUMNS + 1 + GRID_ROWS + 1) as usize + REFERENCE_POINTS.len() * 2,
    );

    ops.push(DrawOp::FillRect {
        x: 0.0,
        y: 0.0,
        width,
        height,
        color: BACKGROUND,
    });

    ops.push(DrawOp::Polygon {
        points: LANDMASS
            .iter()
            .map(|&(fx, fy)| Point::new(width * fx, height * fy))
            .collect(),
        fill: LAND_FILL,
        stroke: Some(LAND_OUTLINE),
    });

    // Lines sit on every division boundary, both surface edges included.
    for i in 0..=GRID_COLUMNS {
        let x = width * i as f64 / GRID_COLUMNS as f64;
        ops.push(DrawOp::Line {
            from: Point::new(x, 0.0),
            to: Point::new(x, height),
            stroke: GRID_LINE,
        });
    }
    for j in 0..=GRID_ROWS {
        let y = height * j as f64 / GRID_ROWS as f64;
        ops.push(DrawOp::Line {
            from: Point::new(0.0, y),
            to: Point::new(width, y),
            stroke: GRID_LINE,
        });
    }

    for point in &REFERENCE_POINTS {
        let center = Point::new(width * point.x, height * point.y);
        ops.push(DrawOp::Circle {
            center,
            radius: MARKER_RADIUS,
            fill: MARKER_COLOR,
        });
        ops.push(DrawOp::Text {
            anchor: Point::new(center.x, center.y - LABEL_OFFSET),
            text: point.name.to_string(),
            color: MARKER_COLOR,
            font_size: LABEL_FONT_SIZE,
            align: TextAlign::Center,
        });
    }

    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_line_counts() {
        let ops = base_map(800.0, 600.0);
        let lines = ops.iter().filter(|op| matches!(op, DrawOp::Line { .. })).count();
        assert_eq!(lines, (GRID_COLUMNS + 1 + GRID_ROWS + 1) as usize);
    }

    #[test]
    fn test_last_grid_lines_reach_far_edges() {
        let ops = base_map(800.0, 600.0);
        let xs: Vec<f64> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { from, to, .. } if from.x == to.x => Some(from.x),
                _ => None,
            })
            .collect();
        assert_eq!(xs.first(), Some(&0.0));
        assert_eq!(xs.last(), Some(&800.0));
        assert_eq!(xs[1], 100.0);
    }
}
