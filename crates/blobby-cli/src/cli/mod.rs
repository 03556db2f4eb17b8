//! CLI command implementations.
//!
//! - `generate` - Generate one shape and write PNG, SVG or JSON
//! - `help` - Print usage

pub mod common;
pub mod generate;

pub use generate::cmd_generate;
