//! Rasterize shape SVG into RGBA images and PNG files.
//!
//! The SVG from `blobby::shape_to_svg` goes through usvg and resvg into a
//! tiny-skia pixmap. tiny-skia stores premultiplied alpha, so pixels are
//! demultiplied on the way into an `image::RgbaImage`; otherwise the
//! antialiased edge of the stroke would come out too dark once saved.

use std::fmt;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use tiny_skia::Pixmap;

/// Errors from rendering or saving a shape.
#[derive(Debug)]
pub enum RenderError {
    /// Generated SVG failed to parse (a bug, but don't crash the editor)
    Svg(String),
    /// Pixmap allocation failed for this size
    Pixmap { width: u32, height: u32 },
    /// Encoding or writing the image failed
    Image(image::ImageError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Svg(msg) => write!(f, "SVG render error: {}", msg),
            RenderError::Pixmap { width, height } => {
                write!(f, "Cannot allocate a {}x{} canvas", width, height)
            }
            RenderError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Image(e)
    }
}

/// Render an SVG document to an RGBA image with a transparent background.
pub fn rasterize(svg: &str) -> Result<RgbaImage, RenderError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| RenderError::Svg(e.to_string()))?;

    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    let mut pixmap = Pixmap::new(width, height)
        .ok_or(RenderError::Pixmap { width, height })?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let mut image = RgbaImage::new(width, height);
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(image)
}

/// Flatten onto an opaque background for terminal preview.
pub fn flatten_onto(image: &RgbaImage, background: Rgba<u8>) -> DynamicImage {
    let mut canvas = RgbaImage::from_pixel(image.width(), image.height(), background);
    image::imageops::overlay(&mut canvas, image, 0, 0);
    DynamicImage::ImageRgba8(canvas)
}

/// Append `.png` when the path has no extension.
pub fn with_png_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

/// Write an RGBA PNG, whatever extension the path has.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), RenderError> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
