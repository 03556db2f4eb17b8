//! # blobby
//!
//! Random smooth closed curves ("blobs") and their SVG rendering.
//!
//! ## Rust Lesson #7: Modules
//!
//! Every module is declared explicitly:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod blob;
pub mod error;
pub mod geometry;
pub mod params;
pub mod rng;
pub mod spline;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use blob::{generate_shape, GenerateError, Shape, CURVE_SAMPLES};
pub use error::{ParamError, SplineError, StyleError};
pub use geometry::Point;
pub use params::{parse_line_width, step_value, Field, ShapeParams};
pub use rng::Rng;
pub use spline::CubicSpline;
pub use svg::{shape_to_svg, RenderStyle};
