use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use icns::{IconFamily, IconType, PixelFormat};
use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::RgbaImage;
use image::imageops::FilterType;
use tracing::debug;

use crate::container::ICONSET_MAPPINGS;
use crate::error::IconError;
use crate::layout::BundleLayout;
use crate::sizes::ICO_SIZES;

/// ICNS element type for an `.iconset` file name.
fn icon_type_for(name: &str) -> Option<IconType> {
    match name {
        "icon_16x16.png" => Some(IconType::RGBA32_16x16),
        "icon_16x16@2x.png" => Some(IconType::RGBA32_16x16_2x),
        "icon_32x32.png" => Some(IconType::RGBA32_32x32),
        "icon_32x32@2x.png" => Some(IconType::RGBA32_32x32_2x),
        "icon_128x128.png" => Some(IconType::RGBA32_128x128),
        "icon_128x128@2x.png" => Some(IconType::RGBA32_128x128_2x),
        "icon_256x256.png" => Some(IconType::RGBA32_256x256),
        "icon_256x256@2x.png" => Some(IconType::RGBA32_256x256_2x),
        "icon_512x512.png" => Some(IconType::RGBA32_512x512),
        "icon_512x512@2x.png" => Some(IconType::RGBA32_512x512_2x),
        _ => None,
    }
}

/// Load a PNG as RGBA at exactly `size` x `size`.
fn load_rgba(path: &Path, size: u32) -> Result<RgbaImage, IconError> {
    let img = image::open(path).map_err(|e| IconError::render(path, e))?;
    if img.width() == size && img.height() == size {
        Ok(img.to_rgba8())
    } else {
        Ok(img.resize_exact(size, size, FilterType::Lanczos3).to_rgba8())
    }
}

/// Write `build/icon.icns` from `build/icons/` using the iconset mapping,
/// without any external tool. Missing sizes are left out of the family.
pub fn write_native_icns(layout: &BundleLayout) -> Result<PathBuf, IconError> {
    let mut family = IconFamily::new();

    for (size, name) in ICONSET_MAPPINGS {
        let src = layout.size_png(size);
        if !src.is_file() {
            debug!(src = %src.display(), "skipping missing icns source");
            continue;
        }
        let Some(icon_type) = icon_type_for(name) else {
            continue;
        };

        let rgba = load_rgba(&src, size)?;
        let mut image = icns::Image::new(PixelFormat::RGBA, size, size);
        image.data_mut().copy_from_slice(rgba.as_raw());
        family
            .add_icon_with_type(&image, icon_type)
            .map_err(|e| IconError::render(&layout.icns, e))?;
    }

    if family.is_empty() {
        return Err(IconError::EmptyOutput(layout.icns.clone()));
    }

    let file = File::create(&layout.icns).map_err(|e| IconError::io(&layout.icns, e))?;
    family
        .write(BufWriter::new(file))
        .map_err(|e| IconError::io(&layout.icns, e))?;

    Ok(layout.icns.clone())
}

/// Write `build/icon.ico` with the [`ICO_SIZES`] entries. Each entry comes
/// from the matching `build/icons/` file, or is resampled from `icon.png`
/// when that size is missing.
pub fn write_ico(layout: &BundleLayout) -> Result<PathBuf, IconError> {
    let mut icon_dir = IconDir::new(ResourceType::Icon);

    for size in ICO_SIZES {
        let src = layout.size_png(size);
        let src = if src.is_file() { src } else { layout.icon.clone() };
        if !src.is_file() {
            return Err(IconError::render(
                &layout.ico,
                format!("no source image for {}x{}", size, size),
            ));
        }

        let rgba = load_rgba(&src, size)?;
        let icon_image = IconImage::from_rgba_data(size, size, rgba.into_raw());
        let entry = IconDirEntry::encode(&icon_image).map_err(|e| IconError::io(&layout.ico, e))?;
        icon_dir.add_entry(entry);
    }

    let file = File::create(&layout.ico).map_err(|e| IconError::io(&layout.ico, e))?;
    icon_dir
        .write(BufWriter::new(file))
        .map_err(|e| IconError::io(&layout.ico, e))?;

    Ok(layout.ico.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::tests::project_with_icons;
    use crate::sizes::SIZES;
    use image::Rgba;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn every_mapping_has_an_icon_type() {
        for (size, name) in ICONSET_MAPPINGS {
            let icon_type = icon_type_for(name).unwrap();
            assert_eq!(icon_type.pixel_width(), size, "{}", name);
        }
    }

    #[test]
    fn native_icns_contains_all_entries() {
        let root = tempdir().unwrap();
        let layout = project_with_icons(root.path(), &SIZES);

        let path = write_native_icns(&layout).unwrap();

        let family = IconFamily::read(File::open(path).unwrap()).unwrap();
        let available = family.available_icons();
        assert!(available.contains(&IconType::RGBA32_16x16));
        assert!(available.contains(&IconType::RGBA32_512x512_2x));
        assert_eq!(available.len(), ICONSET_MAPPINGS.len());
    }

    #[test]
    fn native_icns_without_sources_fails() {
        let root = tempdir().unwrap();
        let layout = project_with_icons(root.path(), &[]);

        let result = write_native_icns(&layout);

        assert!(matches!(result, Err(IconError::EmptyOutput(_))));
        assert!(!layout.icns.exists());
    }

    #[test]
    fn ico_has_standard_sizes() {
        let root = tempdir().unwrap();
        let layout = project_with_icons(root.path(), &SIZES);

        let path = write_ico(&layout).unwrap();

        let icon_dir = IconDir::read(File::open(path).unwrap()).unwrap();
        let mut sizes: Vec<u32> = icon_dir.entries().iter().map(|e| e.width()).collect();
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(sizes, ICO_SIZES.to_vec());
    }

    #[test]
    fn ico_resamples_from_main_icon() {
        let root = tempdir().unwrap();
        let layout = project_with_icons(root.path(), &[]);
        fs::create_dir_all(&layout.build_dir).unwrap();
        RgbaImage::from_pixel(512, 512, Rgba([0, 0, 255, 255]))
            .save(&layout.icon)
            .unwrap();

        write_ico(&layout).unwrap();

        assert!(layout.ico.exists());
    }

    #[test]
    fn ico_without_any_source_fails() {
        let root = tempdir().unwrap();
        let layout = project_with_icons(root.path(), &[]);

        assert!(matches!(write_ico(&layout), Err(IconError::Render { .. })));
    }
}
