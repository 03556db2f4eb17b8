//! SVG output for generated shapes.
//!
//! The curve is drawn the way a plot with hidden axes looks: fitted into a
//! square canvas with equal aspect ratio, a small margin around the data,
//! and nothing but the stroke. The background is left transparent.

use serde::{Deserialize, Serialize};

use crate::blob::Shape;
use crate::error::StyleError;
use crate::geometry::Point;

/// How a shape is laid out and stroked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    /// Canvas width and height in pixels
    #[serde(default = "default_size")]
    pub size: u32,

    /// Pixels per inch; line width is given in points (1/72 inch)
    #[serde(default = "default_dpi")]
    pub dpi: f64,

    /// Stroke color
    #[serde(default = "default_color")]
    pub color: String,

    /// Fraction of the canvas kept empty on each side
    #[serde(default = "default_padding")]
    pub padding: f64,
}

fn default_size() -> u32 {
    500
}

fn default_dpi() -> f64 {
    100.0
}

fn default_color() -> String {
    "gray".to_string()
}

fn default_padding() -> f64 {
    0.1
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            size: default_size(),
            dpi: default_dpi(),
            color: default_color(),
            padding: default_padding(),
        }
    }
}

/// Extra room around the data range, as a fraction of that range.
const DATA_MARGIN: f64 = 0.05;

impl RenderStyle {
    /// Stroke width in pixels for a line width in points.
    pub fn stroke_px(&self, line_width: f64) -> f64 {
        line_width * self.dpi / 72.0
    }

    /// Check that the style yields a drawable, well-formed document.
    ///
    /// Padding of half the canvas or more leaves no room for the curve, and
    /// the color is written into an XML attribute as-is.
    pub fn validate(&self) -> Result<(), StyleError> {
        if self.size == 0 {
            return Err(StyleError::Size(self.size));
        }
        if !self.dpi.is_finite() || self.dpi <= 0.0 {
            return Err(StyleError::Dpi(self.dpi));
        }
        if !self.padding.is_finite() || !(0.0..0.5).contains(&self.padding) {
            return Err(StyleError::Padding(self.padding));
        }
        let bad_char = |c: char| c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '&');
        if self.color.trim().is_empty() || self.color.chars().any(bad_char) {
            return Err(StyleError::Color(self.color.clone()));
        }
        Ok(())
    }
}

/// Maps curve coordinates onto the canvas, y pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Viewport {
    /// Fit `bounds` into a square canvas with equal aspect ratio.
    pub fn fit(bounds: (f64, f64, f64, f64), style: &RenderStyle) -> Self {
        let (min_x, min_y, max_x, max_y) = bounds;
        let size = style.size as f64;

        // Degenerate extents fall back to one unit so the scale stays finite
        let span = |lo: f64, hi: f64| if hi - lo > f64::EPSILON { hi - lo } else { 1.0 };
        let width = span(min_x, max_x) * (1.0 + 2.0 * DATA_MARGIN);
        let height = span(min_y, max_y) * (1.0 + 2.0 * DATA_MARGIN);
        let available = size * (1.0 - 2.0 * style.padding);
        let scale = (available / width).min(available / height);

        let center_x = (min_x + max_x) / 2.0;
        let center_y = (min_y + max_y) / 2.0;

        Self {
            scale,
            offset_x: size / 2.0 - center_x * scale,
            offset_y: size / 2.0 + center_y * scale,
        }
    }

    /// Canvas position of a curve point.
    pub fn project(&self, p: Point) -> Point {
        Point::new(self.offset_x + p.x * self.scale, self.offset_y - p.y * self.scale)
    }
}

/// Build a standalone SVG document for `shape`.
///
/// Identical inputs always give byte-identical output.
pub fn shape_to_svg(shape: &Shape, line_width: f64, style: &RenderStyle) -> String {
    let size = style.size;
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
"#,
        size, size, size, size
    ));

    if let Some(bounds) = shape.bounding_box() {
        let viewport = Viewport::fit(bounds, style);
        let d: String = shape
            .curve
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let q = viewport.project(p);
                let cmd = if i == 0 { "M" } else { " L" };
                format!("{}{:.3},{:.3}", cmd, q.x, q.y)
            })
            .collect();

        svg.push_str(&format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{:.3}" stroke-linejoin="round" stroke-linecap="round"/>
"#,
            d,
            style.color,
            style.stroke_px(line_width)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}
