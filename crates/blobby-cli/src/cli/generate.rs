//! Generate command - one shape, written straight to a file or stdout.

use std::fs;
use std::path::{Path, PathBuf};

use blobby::{generate_shape, shape_to_svg, Field, Rng, ShapeParams};

use super::common::{JsonShape, OutputFormat};
use crate::app::default_export_name;
use crate::config::Config;
use crate::render::{rasterize, save_png, with_png_extension};

/// Parsed `generate` arguments.
///
/// Parameter values stay as text until they are merged with the config so
/// that a typo is reported the same way the editor reports it.
#[derive(Debug, Default, PartialEq)]
pub struct GenerateArgs {
    pub min_vertices: Option<String>,
    pub max_vertices: Option<String>,
    pub scatter: Option<String>,
    pub line_width: Option<String>,
    pub seed: Option<u64>,
    pub size: Option<u32>,
    pub config: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub output: Option<String>,
}

impl GenerateArgs {
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut parsed = GenerateArgs::default();

        let mut i = 0;
        while i < args.len() {
            let flag = args[i].as_str();
            let mut value = || -> Result<String, String> {
                i += 1;
                args.get(i)
                    .cloned()
                    .ok_or_else(|| format!("Missing value for {}", flag))
            };

            match flag {
                "-n" | "--min" => parsed.min_vertices = Some(value()?),
                "-x" | "--max" => parsed.max_vertices = Some(value()?),
                "-s" | "--scatter" => parsed.scatter = Some(value()?),
                "-w" | "--line-width" => parsed.line_width = Some(value()?),
                "--seed" => {
                    let v = value()?;
                    parsed.seed = Some(v.parse().map_err(|_| format!("Invalid seed: {}", v))?);
                }
                "--size" => {
                    let v = value()?;
                    parsed.size = Some(
                        v.parse()
                            .ok()
                            .filter(|&s: &u32| s > 0)
                            .ok_or_else(|| format!("Invalid size: {}", v))?,
                    );
                }
                "-c" | "--config" => parsed.config = Some(PathBuf::from(value()?)),
                "-f" | "--format" => {
                    let v = value()?;
                    parsed.format = Some(OutputFormat::from_name(&v).ok_or_else(|| {
                        format!("Unknown format: {}. Use 'png', 'svg' or 'json'.", v)
                    })?);
                }
                "-o" | "--output" => parsed.output = Some(value()?),
                other => return Err(format!("Unknown argument: {}", other)),
            }
            i += 1;
        }

        Ok(parsed)
    }

    /// Merge flags over config values and validate the result.
    pub fn params(&self, config: &Config) -> Result<ShapeParams, String> {
        let base = &config.params;
        let text = |flag: &Option<String>, field: Field| {
            flag.clone().unwrap_or_else(|| base.field_text(field))
        };

        ShapeParams::parse(
            &text(&self.min_vertices, Field::MinVertices),
            &text(&self.max_vertices, Field::MaxVertices),
            &text(&self.scatter, Field::Scatter),
            &text(&self.line_width, Field::LineWidth),
        )
        .map_err(|e| e.to_string())
    }

    /// Explicit format, else the output extension, else PNG.
    pub fn resolved_format(&self) -> OutputFormat {
        self.format
            .or_else(|| {
                self.output
                    .as_deref()
                    .and_then(|o| OutputFormat::from_path(Path::new(o)))
            })
            .unwrap_or(OutputFormat::Png)
    }
}

/// Run the generate command.
pub fn cmd_generate(args: &[String]) -> Result<(), String> {
    let args = GenerateArgs::parse(args)?;
    let mut config = Config::discover(args.config.as_deref()).map_err(|e| e.to_string())?;
    if let Some(size) = args.size {
        config.render.size = size;
    }

    let params = args.params(&config)?;
    let seed = args.seed.unwrap_or_else(rand::random::<u64>);
    let shape = generate_shape(&params, &mut Rng::new(seed)).map_err(|e| e.to_string())?;

    log::info!(
        "Generated {} vertices ({} curve points) from seed {}",
        shape.vertex_count,
        shape.curve.len(),
        seed
    );

    let format = args.resolved_format();
    match format {
        OutputFormat::Png => {
            let requested = args.output.clone().unwrap_or_else(default_export_name);
            if requested == "-" {
                return Err("PNG output needs a file path".to_string());
            }
            let path = with_png_extension(&config.resolve_output(Path::new(&requested)));
            let svg = shape_to_svg(&shape, params.line_width, &config.render);
            let image = rasterize(&svg).map_err(|e| e.to_string())?;
            save_png(&image, &path).map_err(|e| e.to_string())?;
            eprintln!("Wrote: {}", path.display());
        }
        OutputFormat::Svg | OutputFormat::Json => {
            let output = if format == OutputFormat::Svg {
                shape_to_svg(&shape, params.line_width, &config.render)
            } else {
                serde_json::to_string(&JsonShape::new(&shape, &params, seed))
                    .map_err(|e| format!("Failed to serialize JSON: {}", e))?
            };

            match args.output.as_deref() {
                Some("-") | None => println!("{}", output),
                Some(path) => {
                    let path = config.resolve_output(Path::new(path));
                    fs::write(&path, &output)
                        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
                    eprintln!("Wrote: {}", path.display());
                }
            }
        }
    }

    Ok(())
}
