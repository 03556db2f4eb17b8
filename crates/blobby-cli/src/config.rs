//! Optional YAML configuration.
//!
//! A config file supplies the starting parameters and the render style.
//! Anything missing falls back to the built-in defaults, and command line
//! flags override whatever the file says.
//!
//! ```yaml
//! params:
//!   min_vertices: 6
//!   max_vertices: 12
//!   scatter: 0.2
//!   line_width: 2.0
//! render:
//!   size: 800
//!   color: "#336699"
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use blobby::{RenderStyle, ShapeParams, StyleError};
use serde::{Deserialize, Serialize};

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "blobby.yaml";

/// Top-level config file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Starting shape parameters
    pub params: ShapeParams,

    /// Canvas and stroke settings
    pub render: RenderStyle,

    /// Directory that relative export paths are resolved against
    pub output_dir: Option<PathBuf>,
}

/// Errors from loading a config file.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_yaml::Error },
    Style { path: PathBuf, source: StyleError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Invalid config {}: {}", path.display(), source)
            }
            ConfigError::Style { path, source } => {
                write!(f, "Invalid render settings in {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Parse config from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.render.validate().map_err(|source| ConfigError::Style {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config)
    }

    /// Load the explicit path, else `blobby.yaml` if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            log::info!("Using config {}", fallback.display());
            return Self::load(fallback);
        }

        Ok(Self::default())
    }

    /// Resolve an export path against `output_dir`.
    pub fn resolve_output(&self, path: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_params_keep_other_defaults() {
        let config = Config::from_yaml("params:\n  scatter: 0.5\n").unwrap();
        assert_eq!(config.params.scatter, 0.5);
        assert_eq!(config.params.min_vertices, 10);
        assert_eq!(config.params.max_vertices, 15);
        assert_eq!(config.render, RenderStyle::default());
    }

    #[test]
    fn render_section() {
        let yaml = "render:\n  size: 800\n  color: \"#336699\"\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.render.size, 800);
        assert_eq!(config.render.color, "#336699");
        assert_eq!(config.render.dpi, 100.0);
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(Config::from_yaml("params:\n  min_vertices: lots\n").is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("here.yaml"));
    }

    #[test]
    fn unusable_render_style_is_rejected_on_load() {
        let path = std::env::temp_dir()
            .join(format!("blobby-config-test-{}.yaml", std::process::id()));

        for yaml in [
            "render:\n  padding: 0.5\n",
            "render:\n  dpi: 0.0\n",
            "render:\n  color: 'red\" stroke-opacity=\"0'\n",
        ] {
            fs::write(&path, yaml).unwrap();
            let err = Config::load(&path).unwrap_err();
            assert!(matches!(err, ConfigError::Style { .. }), "{}: {}", yaml, err);
        }

        fs::write(&path, "render:\n  padding: 0.2\n").unwrap();
        let loaded = Config::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.unwrap().render.padding, 0.2);
    }

    #[test]
    fn output_dir_applies_to_relative_paths() {
        let config = Config { output_dir: Some(PathBuf::from("/tmp/blobs")), ..Config::default() };
        assert_eq!(config.resolve_output(Path::new("a.png")), PathBuf::from("/tmp/blobs/a.png"));
        assert_eq!(config.resolve_output(Path::new("/abs/a.png")), PathBuf::from("/abs/a.png"));
        assert_eq!(Config::default().resolve_output(Path::new("a.png")), PathBuf::from("a.png"));
    }
}
