//! Random smooth closed curves ("blobs").
//!
//! A blob is built from N points on the unit circle whose angles are drawn
//! uniformly and then jittered. Each coordinate is interpolated
//! separately with a cubic spline over a uniform parameter, so uneven
//! angular gaps turn into bulges and dents.

use std::f64::consts::TAU;

use serde::Serialize;

use crate::error::{ParamError, SplineError};
use crate::geometry::{self, Point};
use crate::params::ShapeParams;
use crate::rng::Rng;
use crate::spline::CubicSpline;

/// Number of points sampled along every generated curve.
pub const CURVE_SAMPLES: usize = 300;

/// A generated closed curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    /// Vertex count drawn from the parameter range
    pub vertex_count: usize,
    /// Control vertices on the unit circle, closing vertex included
    pub vertices: Vec<Point>,
    /// Smooth curve; first and last points coincide
    pub curve: Vec<Point>,
}

impl Shape {
    /// Bounding box of the sampled curve.
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        geometry::bounding_box(&self.curve)
    }

    /// Gap between the first and last curve samples.
    pub fn closure_gap(&self) -> f64 {
        match (self.curve.first(), self.curve.last()) {
            (Some(first), Some(last)) => first.distance(*last),
            _ => 0.0,
        }
    }
}

/// Failure to generate a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateError {
    Params(ParamError),
    Spline(SplineError),
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::Params(e) => write!(f, "{}", e),
            GenerateError::Spline(e) => write!(f, "curve fitting failed: {}", e),
        }
    }
}

impl std::error::Error for GenerateError {}

impl From<ParamError> for GenerateError {
    fn from(e: ParamError) -> Self {
        GenerateError::Params(e)
    }
}

impl From<SplineError> for GenerateError {
    fn from(e: SplineError) -> Self {
        GenerateError::Spline(e)
    }
}

/// Generate a blob from validated parameters.
///
/// ## Rust Lesson #21: The ? Operator
///
/// `params.validate()?` returns early with the `ParamError`, converted
/// into a `GenerateError` through the `From` impl above.
pub fn generate_shape(params: &ShapeParams, rng: &mut Rng) -> Result<Shape, GenerateError> {
    params.validate()?;

    let vertex_count = rng.next_int_inclusive(params.min_vertices, params.max_vertices);
    let angles = scattered_angles(vertex_count, params.scatter, rng);
    let vertices = closed_vertices(&angles);
    let curve = smooth_closed_curve(&vertices, CURVE_SAMPLES)?;

    Ok(Shape { vertex_count, vertices, curve })
}

/// Sorted angles in [0, 2π) after Gaussian jitter.
///
/// Angles are drawn uniformly and sorted, each one is moved by
/// N(0, scatter²), then everything is wrapped back into [0, 2π) and
/// sorted again.
pub fn scattered_angles(count: usize, scatter: f64, rng: &mut Rng) -> Vec<f64> {
    let mut angles: Vec<f64> = (0..count).map(|_| rng.next_range(0.0, TAU)).collect();
    angles.sort_by(f64::total_cmp);

    for angle in &mut angles {
        *angle = wrap_angle(*angle + rng.next_gaussian(0.0, scatter));
    }
    angles.sort_by(f64::total_cmp);
    angles
}

/// Wrap an angle into [0, 2π).
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Unit-circle points for `angles`, with the first repeated at the end.
pub fn closed_vertices(angles: &[f64]) -> Vec<Point> {
    let mut vertices: Vec<Point> = angles.iter().map(|&a| Point::on_unit_circle(a)).collect();
    if let Some(&first) = vertices.first() {
        vertices.push(first);
    }
    vertices
}

/// Interpolate x(t) and y(t) through `vertices` and sample `samples` points.
///
/// The closing vertex makes the curve start and end at the same point.
pub fn smooth_closed_curve(vertices: &[Point], samples: usize) -> Result<Vec<Point>, SplineError> {
    let xs: Vec<f64> = vertices.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = vertices.iter().map(|p| p.y).collect();

    let spline_x = CubicSpline::fit_uniform(&xs)?;
    let spline_y = CubicSpline::fit_uniform(&ys)?;

    Ok(spline_x
        .sample(samples)
        .into_iter()
        .zip(spline_y.sample(samples))
        .map(|(x, y)| Point::new(x, y))
        .collect())
}
