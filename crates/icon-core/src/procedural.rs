//! Procedural badge drawing.
//!
//! The badge is a disc of concentric rings whose color and alpha shift with
//! the ring radius, approximating a radial gradient, with a white glyph and a
//! soft drop shadow on top. Used when no SVG rasterizer works and by the
//! `temp-icon` generator.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};
use tracing::debug;

use crate::batch::{BatchReport, copy_derived};
use crate::error::IconError;
use crate::layout::BundleLayout;
use crate::progress::{Progress, ProgressAction};
use crate::sizes::{ICON_SIZE, SIZES};

/// Base resolution the `temp-icon` generator draws at.
pub const BASE_SIZE: u32 = 512;

const SHADOW: Rgba<u8> = Rgba([0, 0, 0, 128]);
const GLYPH: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FONT_FAMILIES: &str = "Helvetica, Arial, sans-serif";

/// One color channel as a function of the ring ratio `r / radius`:
/// `trunc(scale * (offset + span * ratio))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    pub scale: f64,
    pub offset: f64,
    pub span: f64,
}

impl Channel {
    pub const fn new(scale: f64, offset: f64, span: f64) -> Self {
        Channel {
            scale,
            offset,
            span,
        }
    }

    pub fn at(&self, ratio: f64) -> u8 {
        (self.scale * (self.offset + self.span * ratio)).clamp(0.0, 255.0) as u8
    }
}

/// Geometry and colors of a badge. Lengths are fractions of the image size.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeStyle {
    pub radius: f64,
    pub ring_step: u32,
    pub red: Channel,
    pub green: Channel,
    pub blue: Channel,
    pub alpha: Channel,
    pub glyph: char,
    pub glyph_size: f64,
    pub glyph_lift: f64,
}

impl BadgeStyle {
    /// Style drawn at every size when the SVG can't be rasterized.
    pub fn fallback() -> Self {
        BadgeStyle {
            radius: 0.47,
            ring_step: 2,
            red: Channel::new(255.0, 0.4, 0.3),
            green: Channel::new(107.0, 0.4, 0.6),
            blue: Channel::new(107.0, 0.4, 0.6),
            alpha: Channel::new(255.0, 0.8, 0.2),
            glyph: 'T',
            glyph_size: 0.6,
            glyph_lift: 0.05,
        }
    }

    /// Style of the temporary icon: opaque, drawn once at [`BASE_SIZE`].
    pub fn temporary() -> Self {
        BadgeStyle {
            radius: 240.0 / 512.0,
            ring_step: 5,
            red: Channel::new(255.0, 0.4, 0.2),
            green: Channel::new(107.0, 0.4, 0.6),
            blue: Channel::new(107.0, 0.4, 0.6),
            alpha: Channel::new(255.0, 1.0, 0.0),
            glyph: 'T',
            glyph_size: 200.0 / 512.0,
            glyph_lift: 20.0 / 512.0,
        }
    }

    fn ring_color(&self, ratio: f64) -> Rgba<u8> {
        Rgba([
            self.red.at(ratio),
            self.green.at(ratio),
            self.blue.at(ratio),
            self.alpha.at(ratio),
        ])
    }
}

/// Shadow offset in pixels for an image of `size`.
pub fn shadow_offset(size: u32) -> u32 {
    (size / 128).max(1)
}

/// Draws badges in a given style. Holds the font database so repeated draws
/// don't rescan the system fonts.
pub struct BadgePainter {
    style: BadgeStyle,
    options: usvg::Options<'static>,
}

impl BadgePainter {
    pub fn new(style: BadgeStyle) -> Self {
        let mut options = usvg::Options::default();
        Arc::make_mut(&mut options.fontdb).load_system_fonts();
        BadgePainter { style, options }
    }

    /// A painter that never finds a font and always draws the block glyph.
    pub fn without_fonts(style: BadgeStyle) -> Self {
        BadgePainter {
            style,
            options: usvg::Options::default(),
        }
    }

    /// Draw the complete badge at `size` x `size`.
    pub fn draw(&self, size: u32) -> RgbaImage {
        let mut badge = self.draw_rings(size);
        let glyph = match self.render_text_glyph(size) {
            Some(layer) => layer,
            None => {
                debug!(size, "no usable font, drawing block glyph");
                self.draw_block_glyph(size)
            }
        };
        imageops::overlay(&mut badge, &glyph, 0, 0);
        badge
    }

    /// Fill concentric discs from the outer radius inward. Smaller discs
    /// overwrite larger ones, so each pixel takes the color of the smallest
    /// ring radius that still covers it.
    fn draw_rings(&self, size: u32) -> RgbaImage {
        let mut img = RgbaImage::new(size, size);
        let radius = (size as f64 * self.style.radius) as u32;
        if radius == 0 {
            return img;
        }

        let step = self.style.ring_step.max(1);
        // Smallest positive ring radius: radius - k_max * step.
        let k_max = (radius - 1) / step;
        let center = (size / 2) as i64;

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let dx = x as i64 - center;
            let dy = y as i64 - center;
            let dist = ((dx * dx + dy * dy) as f64).sqrt();
            if dist > radius as f64 {
                continue;
            }
            let k = (((radius as f64 - dist) / step as f64).floor() as u32).min(k_max);
            let ring = radius - k * step;
            *pixel = self.style.ring_color(ring as f64 / radius as f64);
        }

        img
    }

    /// Render the glyph and its shadow with a system font. Returns `None` if
    /// nothing was drawn, which happens when no font matched.
    fn render_text_glyph(&self, size: u32) -> Option<RgbaImage> {
        let svg = glyph_svg(&self.style, size);
        let tree = usvg::Tree::from_data(svg.as_bytes(), &self.options).ok()?;
        let mut pixmap = tiny_skia::Pixmap::new(size, size)?;
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        let mut layer = RgbaImage::new(size, size);
        let mut drawn = false;
        for (pixel, src) in layer.pixels_mut().zip(pixmap.pixels()) {
            let color = src.demultiply();
            if color.alpha() > 0 {
                drawn = true;
            }
            *pixel = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
        }

        drawn.then_some(layer)
    }

    /// Draw a geometric glyph shape (a block `T`) with its shadow.
    fn draw_block_glyph(&self, size: u32) -> RgbaImage {
        let mut layer = RgbaImage::new(size, size);
        let font = size as f64 * self.style.glyph_size;
        let cx = size as f64 / 2.0;
        let cy = size as f64 / 2.0 - size as f64 * self.style.glyph_lift;

        let height = (font * 0.72).max(3.0);
        let bar_width = (font * 0.62).max(3.0);
        let bar_height = (font * 0.14).max(1.0);
        let stem_width = (font * 0.16).max(1.0);
        let top = cy - height / 2.0;

        let rects = [
            (cx - bar_width / 2.0, top, bar_width, bar_height),
            (cx - stem_width / 2.0, top, stem_width, height),
        ];

        let offset = shadow_offset(size) as f64;
        for (x, y, w, h) in rects {
            fill_rect(&mut layer, x + offset, y + offset, w, h, SHADOW);
        }
        for (x, y, w, h) in rects {
            fill_rect(&mut layer, x, y, w, h, GLYPH);
        }

        layer
    }
}

/// SVG document with the shadow and glyph text, centered and lifted.
fn glyph_svg(style: &BadgeStyle, size: u32) -> String {
    let font_size = size as f64 * style.glyph_size;
    let x = size as f64 / 2.0;
    let y = size as f64 / 2.0 - size as f64 * style.glyph_lift;
    let offset = shadow_offset(size) as f64;
    let glyph = escape_xml(style.glyph);
    let shadow_opacity = SHADOW[3] as f64 / 255.0;

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">
<g font-family="{FONT_FAMILIES}" font-size="{font_size}" text-anchor="middle" dominant-baseline="central">
<text x="{sx}" y="{sy}" fill="#000000" fill-opacity="{shadow_opacity:.4}">{glyph}</text>
<text x="{x}" y="{y}" fill="#ffffff">{glyph}</text>
</g>
</svg>"##,
        sx = x + offset,
        sy = y + offset,
    )
}

fn escape_xml(c: char) -> String {
    match c {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        other => other.to_string(),
    }
}

fn fill_rect(img: &mut RgbaImage, x: f64, y: f64, w: f64, h: f64, color: Rgba<u8>) {
    let x0 = x.round().max(0.0) as u32;
    let y0 = y.round().max(0.0) as u32;
    let x1 = ((x + w).round() as u32).min(img.width());
    let y1 = ((y + h).round() as u32).min(img.height());
    for py in y0..y1 {
        for px in x0..x1 {
            img.put_pixel(px, py, color);
        }
    }
}

/// Resample to `size` x `size` with the Lanczos3 filter.
pub fn resample(img: &RgbaImage, size: u32) -> RgbaImage {
    if img.width() == size && img.height() == size {
        return img.clone();
    }
    imageops::resize(img, size, size, FilterType::Lanczos3)
}

/// Save as PNG, creating the parent directory if needed.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<(), IconError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| IconError::io(parent, e))?;
        }
    }
    img.save(path).map_err(|e| IconError::render(path, e))
}

/// Draw every size of [`SIZES`] directly with `painter`.
///
/// Returns the report and the image drawn at [`ICON_SIZE`], which the aliases
/// are derived from.
pub fn draw_sizes<F>(
    painter: &BadgePainter,
    layout: &BundleLayout,
    mut on_progress: Option<F>,
) -> (BatchReport, RgbaImage)
where
    F: FnMut(Progress),
{
    let mut report = BatchReport::default();
    let mut base = None;
    let total = SIZES.len();
    for (index, size) in SIZES.into_iter().enumerate() {
        let img = painter.draw(size);
        let output = layout.size_png(size);
        let result = save_png(&img, &output);
        report.record(&mut on_progress, ProgressAction::Drawing, index, total, &output, result);
        if size == ICON_SIZE {
            base = Some(img);
        }
    }

    let base = base.unwrap_or_else(|| painter.draw(ICON_SIZE));
    (report, base)
}

/// Resample `base` to every size of [`SIZES`].
pub fn resample_sizes<F>(
    base: &RgbaImage,
    layout: &BundleLayout,
    mut on_progress: Option<F>,
) -> BatchReport
where
    F: FnMut(Progress),
{
    let mut report = BatchReport::default();
    let total = SIZES.len();
    for (index, size) in SIZES.into_iter().enumerate() {
        let output = layout.size_png(size);
        let result = save_png(&resample(base, size), &output);
        report.record(&mut on_progress, ProgressAction::Drawing, index, total, &output, result);
    }
    report
}

/// Write the main aliases by resampling `base`, then copy the tray icon to
/// its variants and the logo to the renderer asset path.
pub fn write_aliases<F>(
    base: &RgbaImage,
    layout: &BundleLayout,
    mut on_progress: Option<F>,
) -> BatchReport
where
    F: FnMut(Progress),
{
    let mut report = BatchReport::default();
    let aliases = layout.aliases();
    let total = aliases.len();
    for (index, (size, output)) in aliases.into_iter().enumerate() {
        let result = save_png(&resample(base, size), output);
        report.record(&mut on_progress, ProgressAction::Drawing, index, total, output, result);
    }

    report.merge(copy_derived(layout, &mut on_progress));
    report
}
