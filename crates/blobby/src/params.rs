//! Shape generation parameters and the text fields they are edited through.

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Which editable parameter a value or message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    LineWidth,
    Scatter,
    MinVertices,
    MaxVertices,
}

impl Field {
    /// All fields in display order.
    pub fn all() -> &'static [Field] {
        &[Field::LineWidth, Field::Scatter, Field::MinVertices, Field::MaxVertices]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Field::LineWidth => "Line width",
            Field::Scatter => "Scatter",
            Field::MinVertices => "Min vertices",
            Field::MaxVertices => "Max vertices",
        }
    }

    /// Increment used by the +/- controls.
    pub fn step(&self) -> f64 {
        match self {
            Field::LineWidth => 0.1,
            Field::Scatter => 0.01,
            Field::MinVertices | Field::MaxVertices => 1.0,
        }
    }

    /// Whether the field holds a vertex count.
    pub fn is_integer(&self) -> bool {
        matches!(self, Field::MinVertices | Field::MaxVertices)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters for one blob.
///
/// Deserializable so the CLI config file can provide defaults; every field
/// falls back to the built-in default when missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    /// Smallest vertex count to draw (>= 3)
    pub min_vertices: usize,
    /// Largest vertex count to draw (min_vertices..=10_000)
    pub max_vertices: usize,
    /// Std-dev of the angular noise, in radians
    pub scatter: f64,
    /// Stroke width in points
    pub line_width: f64,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            min_vertices: 10,
            max_vertices: 15,
            scatter: 0.1,
            line_width: 1.0,
        }
    }
}

/// Smallest vertex count that still encloses an area.
pub const MIN_VERTICES: usize = 3;

/// Largest vertex count accepted. Far beyond anything that reads as a blob,
/// and small enough that the angle and knot buffers stay tiny.
pub const MAX_VERTICES: usize = 10_000;

impl ShapeParams {
    /// Check every range constraint.
    pub fn validate(&self) -> Result<(), ParamError> {
        let min = i64::try_from(self.min_vertices).unwrap_or(i64::MAX);
        let max = i64::try_from(self.max_vertices).unwrap_or(i64::MAX);
        validate_vertex_range(min, max)?;
        validate_scatter(self.scatter)?;
        validate_line_width(self.line_width)?;
        Ok(())
    }

    /// Parse and validate the four text fields.
    ///
    /// Fields are checked in the order vertex counts, line width, scatter,
    /// and the first failure wins.
    pub fn parse(
        min_vertices: &str,
        max_vertices: &str,
        scatter: &str,
        line_width: &str,
    ) -> Result<Self, ParamError> {
        let min = parse_int(Field::MinVertices, min_vertices)?;
        let max = parse_int(Field::MaxVertices, max_vertices)?;
        let line_width = parse_float(Field::LineWidth, line_width)?;
        let scatter = parse_float(Field::Scatter, scatter)?;

        validate_vertex_range(min, max)?;
        validate_scatter(scatter)?;
        validate_line_width(line_width)?;

        Ok(Self {
            min_vertices: min as usize,
            max_vertices: max as usize,
            scatter,
            line_width,
        })
    }

    /// Text for a field as it appears in an editor.
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::LineWidth => format_float(self.line_width),
            Field::Scatter => format_float(self.scatter),
            Field::MinVertices => self.min_vertices.to_string(),
            Field::MaxVertices => self.max_vertices.to_string(),
        }
    }
}

/// Parse and validate the line width field on its own.
///
/// Used when only the stroke changes and the curve is kept.
pub fn parse_line_width(text: &str) -> Result<f64, ParamError> {
    let width = parse_float(Field::LineWidth, text)?;
    validate_line_width(width)?;
    Ok(width)
}

/// Add `delta` to the number in `text`.
///
/// Integer fields are rounded to the nearest whole number. Returns `None`
/// when the text isn't a finite number, in which case the field is left alone.
pub fn step_value(text: &str, delta: f64, integer: bool) -> Option<String> {
    let value = text.trim().parse::<f64>().ok().filter(|v| v.is_finite())? + delta;
    if integer {
        Some(format!("{}", value.round() as i64))
    } else {
        Some(format_float(value))
    }
}

/// Format a float for an edit field, hiding accumulated rounding error.
///
/// `0.1 + 0.2` shows as `0.3`, and whole numbers keep a trailing `.0`.
pub fn format_float(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    // -0.0 reads badly in a text box
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:?}", rounded)
}

fn parse_int(field: Field, text: &str) -> Result<i64, ParamError> {
    text.trim().parse::<i64>().map_err(|_| ParamError::NotANumber {
        field,
        value: text.to_string(),
    })
}

fn parse_float(field: Field, text: &str) -> Result<f64, ParamError> {
    text.trim().parse::<f64>().map_err(|_| ParamError::NotANumber {
        field,
        value: text.to_string(),
    })
}

fn validate_vertex_range(min: i64, max: i64) -> Result<(), ParamError> {
    let floor = MIN_VERTICES as i64;
    let ceiling = MAX_VERTICES as i64;
    if min < floor || max < floor || min > max || max > ceiling {
        return Err(ParamError::VertexRange { min, max });
    }
    Ok(())
}

fn validate_scatter(scatter: f64) -> Result<(), ParamError> {
    if !scatter.is_finite() || scatter < 0.0 {
        return Err(ParamError::Scatter(scatter));
    }
    Ok(())
}

fn validate_line_width(width: f64) -> Result<(), ParamError> {
    if !width.is_finite() || width <= 0.0 {
        return Err(ParamError::LineWidth(width));
    }
    Ok(())
}
