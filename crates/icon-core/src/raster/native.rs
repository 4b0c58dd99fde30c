use std::fs;
use std::path::Path;
use std::sync::Arc;

use resvg::{tiny_skia, usvg};

use crate::error::IconError;
use crate::raster::Rasterizer;
use crate::utils::file_ops::write_file;

/// In-process rasterizer using `resvg`.
pub struct ResvgRasterizer {
    options: usvg::Options<'static>,
}

impl ResvgRasterizer {
    /// Create a rasterizer with the system fonts loaded, so `<text>` in the
    /// logo renders.
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        Arc::make_mut(&mut options.fontdb).load_system_fonts();
        ResvgRasterizer { options }
    }

    /// Render SVG source to PNG bytes at `size` x `size`.
    pub fn render_png(&self, svg_data: &[u8], size: u32) -> Result<Vec<u8>, String> {
        let tree = usvg::Tree::from_data(svg_data, &self.options).map_err(|e| e.to_string())?;

        let mut pixmap = tiny_skia::Pixmap::new(size, size)
            .ok_or_else(|| format!("cannot allocate {}x{} pixmap", size, size))?;

        let svg_size = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            size as f32 / svg_size.width(),
            size as f32 / svg_size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        pixmap.encode_png().map_err(|e| e.to_string())
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    fn name(&self) -> &str {
        "resvg"
    }

    fn rasterize(&self, svg: &Path, output: &Path, size: u32) -> Result<(), IconError> {
        let svg_data = fs::read(svg).map_err(|e| IconError::io(svg, e))?;
        let png = self
            .render_png(&svg_data, size)
            .map_err(|reason| IconError::render(output, reason))?;
        write_file(output, &png).map_err(|e| IconError::io(output, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::tests::TEST_SVG;
    use crate::sizes::SIZES;
    use tempfile::tempdir;

    #[test]
    fn renders_every_size_at_exact_dimensions() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("logo.svg");
        fs::write(&svg, TEST_SVG).unwrap();
        let rasterizer = ResvgRasterizer::new();

        for size in SIZES {
            let output = dir.path().join(format!("{}.png", size));
            rasterizer.rasterize(&svg, &output, size).unwrap();

            assert_eq!(image::image_dimensions(&output).unwrap(), (size, size));
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let rasterizer = ResvgRasterizer::new();

        let first = rasterizer.render_png(TEST_SVG.as_bytes(), 64).unwrap();
        let second = rasterizer.render_png(TEST_SVG.as_bytes(), 64).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn background_stays_transparent() {
        let rasterizer = ResvgRasterizer::new();
        let png = rasterizer.render_png(TEST_SVG.as_bytes(), 100).unwrap();

        let img = image::load_from_memory(&png).unwrap().to_rgba8();

        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(50, 80)[3], 255);
    }

    #[test]
    fn missing_svg_is_io_error() {
        let dir = tempdir().unwrap();
        let rasterizer = ResvgRasterizer::new();

        let result = rasterizer.rasterize(
            &dir.path().join("missing.svg"),
            &dir.path().join("out.png"),
            32,
        );

        assert!(matches!(result, Err(IconError::Io { .. })));
    }

    #[test]
    fn malformed_svg_is_render_error() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("broken.svg");
        fs::write(&svg, "<svg").unwrap();
        let output = dir.path().join("out.png");

        let result = ResvgRasterizer::new().rasterize(&svg, &output, 32);

        assert!(matches!(result, Err(IconError::Render { .. })));
        assert!(!output.exists());
    }
}
