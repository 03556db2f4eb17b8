//! Error types for shape parameters and curve fitting.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. Each failure the user
//! can cause gets its own variant, so the UI can decide how to show it.

use std::fmt;

use crate::params::{Field, MAX_VERTICES};

/// Invalid shape parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Field text could not be parsed as the expected number type.
    NotANumber { field: Field, value: String },
    /// Vertex counts outside 3..=10_000 or min above max.
    VertexRange { min: i64, max: i64 },
    /// Scatter is negative or not finite.
    Scatter(f64),
    /// Line width is zero, negative or not finite.
    LineWidth(f64),
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::NotANumber { field, value } if field.is_integer() => {
                write!(f, "{} must be a whole number, got {:?}", field, value)
            }
            ParamError::NotANumber { field, value } => {
                write!(f, "{} must be a number, got {:?}", field, value)
            }
            ParamError::VertexRange { min, max } => write!(
                f,
                "Min and max vertices must both be at least 3 and at most {} and min must not exceed max (got {}..{})",
                MAX_VERTICES, min, max
            ),
            ParamError::Scatter(v) => write!(f, "Scatter must be zero or positive, got {}", v),
            ParamError::LineWidth(v) => write!(f, "Line width must be positive, got {}", v),
        }
    }
}

impl std::error::Error for ParamError {}

/// Failure to fit an interpolating spline.
#[derive(Debug, Clone, PartialEq)]
pub enum SplineError {
    /// Not-a-knot cubic fitting needs at least four knots.
    TooFewPoints(usize),
}

impl fmt::Display for SplineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplineError::TooFewPoints(n) => {
                write!(f, "cubic spline needs at least 4 points, got {}", n)
            }
        }
    }
}

impl std::error::Error for SplineError {}

/// A render style that can't produce a usable image.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleError {
    Size(u32),
    Dpi(f64),
    Padding(f64),
    Color(String),
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleError::Size(v) => write!(f, "Canvas size must be positive, got {}", v),
            StyleError::Dpi(v) => write!(f, "DPI must be positive, got {}", v),
            StyleError::Padding(v) => {
                write!(f, "Padding must be at least 0 and below 0.5, got {}", v)
            }
            StyleError::Color(v) => write!(f, "Invalid stroke color {:?}", v),
        }
    }
}

impl std::error::Error for StyleError {}
