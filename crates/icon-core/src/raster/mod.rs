//! SVG rasterization methods.
//!
//! Each method renders the SVG logo into a square PNG. External methods shell
//! out to a command-line rasterizer found on PATH; [`Method::Resvg`] renders
//! in-process.

mod external;
mod native;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IconError;

use external::Tool;

pub use external::ExternalRasterizer;
pub use native::ResvgRasterizer;

/// A way of turning the SVG into a PNG of a given size.
pub trait Rasterizer {
    /// Short name used in console output.
    fn name(&self) -> &str;

    /// Render `svg` into `output` as a `size` x `size` PNG.
    fn rasterize(&self, svg: &Path, output: &Path, size: u32) -> Result<(), IconError>;
}

/// The rasterization methods, in their default priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    RsvgConvert,
    Inkscape,
    #[serde(rename = "imagemagick", alias = "convert")]
    ImageMagick,
    Resvg,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::RsvgConvert,
        Method::Inkscape,
        Method::ImageMagick,
        Method::Resvg,
    ];

    /// The default priority order.
    pub fn default_order() -> Vec<Method> {
        Self::ALL.to_vec()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::RsvgConvert => "rsvg-convert",
            Method::Inkscape => "inkscape",
            Method::ImageMagick => "imagemagick",
            Method::Resvg => "resvg",
        }
    }

    /// External program this method needs on PATH, if any.
    pub fn tool(self) -> Option<&'static str> {
        Tool::for_method(self).map(Tool::command)
    }

    /// Build the rasterizer for this method.
    pub fn rasterizer(self) -> Box<dyn Rasterizer> {
        match ExternalRasterizer::new(self) {
            Some(external) => Box::new(external),
            None => Box::new(ResvgRasterizer::new()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rsvg-convert" | "rsvg" => Ok(Method::RsvgConvert),
            "inkscape" => Ok(Method::Inkscape),
            "imagemagick" | "convert" | "magick" => Ok(Method::ImageMagick),
            "resvg" => Ok(Method::Resvg),
            _ => Err(format!(
                "unknown method '{}' (expected rsvg-convert, inkscape, imagemagick or resvg)",
                s
            )),
        }
    }
}

/// Make sure the PNG at `path` is exactly `size` x `size`, resampling it with
/// Lanczos3 if the rasterizer produced something else.
pub fn ensure_size(path: &Path, size: u32) -> Result<(), IconError> {
    let (width, height) =
        image::image_dimensions(path).map_err(|e| IconError::render(path, e))?;
    if width == size && height == size {
        return Ok(());
    }

    debug!(
        path = %path.display(),
        width, height, size, "resampling output to requested size"
    );
    let img = image::open(path).map_err(|e| IconError::render(path, e))?;
    img.resize_exact(size, size, FilterType::Lanczos3)
        .save(path)
        .map_err(|e| IconError::render(path, e))
}
