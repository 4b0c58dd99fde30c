use std::path::{Path, PathBuf};

use crate::sizes::{ICON_SIZE, LOGO_SIZE, TRAY_SIZE, size_file_name};

/// Resolved locations of every file the tools read or write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    pub svg: PathBuf,
    pub build_dir: PathBuf,
    pub icons_dir: PathBuf,
    pub probe: PathBuf,
    pub icon: PathBuf,
    pub logo: PathBuf,
    pub tray: PathBuf,
    pub tray_light: PathBuf,
    pub tray_dark: PathBuf,
    pub renderer_logo: PathBuf,
    pub iconset_dir: PathBuf,
    pub icns: PathBuf,
    pub ico: PathBuf,
}

impl BundleLayout {
    /// Lay out the bundle under `root`. Relative `svg`, `build_dir` and
    /// `renderer_logo` are resolved against `root`; absolute ones are kept.
    pub fn new(root: &Path, svg: &Path, build_dir: &Path, renderer_logo: &Path) -> Self {
        let build_dir = root.join(build_dir);
        BundleLayout {
            svg: root.join(svg),
            icons_dir: build_dir.join("icons"),
            probe: build_dir.join("test_icon.png"),
            icon: build_dir.join("icon.png"),
            logo: build_dir.join("logo.png"),
            tray: build_dir.join("tray_icon.png"),
            tray_light: build_dir.join("tray_icon_light.png"),
            tray_dark: build_dir.join("tray_icon_dark.png"),
            renderer_logo: root.join(renderer_logo),
            iconset_dir: build_dir.join("icon.iconset"),
            icns: build_dir.join("icon.icns"),
            ico: build_dir.join("icon.ico"),
            build_dir,
        }
    }

    /// Path of the PNG for one entry of the size set.
    pub fn size_png(&self, size: u32) -> PathBuf {
        self.icons_dir.join(size_file_name(size))
    }

    /// The main alias files with the size each is rendered at.
    pub fn aliases(&self) -> [(u32, &Path); 3] {
        [
            (ICON_SIZE, self.icon.as_path()),
            (LOGO_SIZE, self.logo.as_path()),
            (TRAY_SIZE, self.tray.as_path()),
        ]
    }
}
