//! Common utilities shared across CLI commands.

use std::path::Path;

use blobby::{Point, Shape, ShapeParams};
use serde::Serialize;

/// Output format for a generated shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
    Json,
}

impl OutputFormat {
    /// Parse a format name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "svg" => Some(OutputFormat::Svg),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
    }
}

/// JSON output for one shape.
#[derive(Serialize)]
pub struct JsonShape<'a> {
    pub seed: u64,
    pub params: &'a ShapeParams,
    pub vertex_count: usize,
    pub vertices: &'a [Point],
    pub curve: &'a [Point],
}

impl<'a> JsonShape<'a> {
    pub fn new(shape: &'a Shape, params: &'a ShapeParams, seed: u64) -> Self {
        Self {
            seed,
            params,
            vertex_count: shape.vertex_count,
            vertices: &shape.vertices,
            curve: &shape.curve,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobby::{generate_shape, Rng};

    #[test]
    fn format_names() {
        assert_eq!(OutputFormat::from_name("PNG"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_name("svg"), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_name("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("gif"), None);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("a/b.svg")), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_path(Path::new("blob")), None);
    }

    #[test]
    fn json_has_all_fields() {
        let params = ShapeParams::default();
        let shape = generate_shape(&params, &mut Rng::new(5)).unwrap();
        let json = serde_json::to_value(JsonShape::new(&shape, &params, 5)).unwrap();

        assert_eq!(json["seed"], 5);
        assert_eq!(json["params"]["min_vertices"], 10);
        assert_eq!(json["vertex_count"], shape.vertex_count);
        assert_eq!(json["curve"].as_array().map(|a| a.len()), Some(300));
        assert!(json["vertices"][0]["x"].is_number());
    }
}
