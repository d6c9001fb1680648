//! SVG serialisation of a draw list.

use std::fmt::Write;

use crate::draw::{DrawOp, Rgba, Stroke, TextAlign};

const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

/// Serialise `ops` into a standalone SVG document of the given size.
///
/// Operations are emitted in order, so later operations paint over
/// earlier ones exactly as on a canvas.
pub fn to_svg(width: u32, height: u32, ops: &[DrawOp]) -> String {
    let mut out = String::with_capacity(256 + ops.len() * 128);
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );

    let mut gradient_id = 0usize;
    for op in ops {
        match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let _ = writeln!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
                    x,
                    y,
                    width,
                    height,
                    fill_attrs(color)
                );
            }
            DrawOp::Polygon {
                points,
                fill,
                stroke,
            } => {
                let pts = points
                    .iter()
                    .map(|p| format!("{},{}", p.x, p.y))
                    .collect::<Vec<_>>()
                    .join(" ");
                let _ = writeln!(
                    out,
                    r#"<polygon points="{}" {}{}/>"#,
                    pts,
                    fill_attrs(fill),
                    stroke.as_ref().map(stroke_attrs).unwrap_or_default()
                );
            }
            DrawOp::Line { from, to, stroke } => {
                let _ = writeln!(
                    out,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    stroke_attrs(stroke)
                );
            }
            DrawOp::Circle {
                center,
                radius,
                fill,
            } => {
                let _ = writeln!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}" {}/>"#,
                    center.x,
                    center.y,
                    radius,
                    fill_attrs(fill)
                );
            }
            DrawOp::Text {
                anchor,
                text,
                color,
                font_size,
                align,
            } => {
                let _ = writeln!(
                    out,
                    r#"<text x="{}" y="{}" font-family="{}" font-size="{}" text-anchor="{}" {}>{}</text>"#,
                    anchor.x,
                    anchor.y,
                    FONT_FAMILY,
                    font_size,
                    text_anchor(*align),
                    fill_attrs(color),
                    escape(text)
                );
            }
            DrawOp::RadialGradient {
                center,
                radius,
                inner,
                outer,
            } => {
                let id = format!("precip-{}", gradient_id);
                gradient_id += 1;
                let _ = writeln!(
                    out,
                    r#"<defs><radialGradient id="{id}" gradientUnits="userSpaceOnUse" cx="{cx}" cy="{cy}" r="{r}"><stop offset="0" stop-color="{ic}" stop-opacity="{ia}"/><stop offset="1" stop-color="{oc}" stop-opacity="{oa}"/></radialGradient></defs>"#,
                    id = id,
                    cx = center.x,
                    cy = center.y,
                    r = radius,
                    ic = inner.hex(),
                    ia = inner.a,
                    oc = outer.hex(),
                    oa = outer.a
                );
                let _ = writeln!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="url(#{})"/>"#,
                    center.x, center.y, radius, id
                );
            }
        }
    }

    out.push_str("</svg>\n");
    out
}

fn fill_attrs(color: &Rgba) -> String {
    format!(r#"fill="{}" fill-opacity="{}""#, color.hex(), color.a)
}

fn stroke_attrs(stroke: &Stroke) -> String {
    format!(
        r#" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
        stroke.color.hex(),
        stroke.color.a,
        stroke.width
    )
}

fn text_anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Start => "start",
        TextAlign::Center => "middle",
        TextAlign::End => "end",
    }
}

fn escape(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&apos;"),
            _ => s.push(c),
        }
    }
    s
}
