use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::container::ContainerBackend;
use crate::error::IconError;
use crate::layout::BundleLayout;
use crate::raster::Method;

/// Default file name looked up in the project root.
pub const CONFIG_FILENAME: &str = "icons.json";

/// Settings for both generators. Every field has a default, so an empty JSON
/// object (or no file at all) reproduces the standard layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    pub svg: PathBuf,
    pub build_dir: PathBuf,
    pub renderer_logo: PathBuf,
    pub methods: Vec<Method>,
    pub procedural_fallback: bool,
    pub container: ContainerBackend,
    pub ico: bool,
}

impl Default for IconConfig {
    fn default() -> Self {
        IconConfig {
            svg: PathBuf::from("build/tutu-logo.svg"),
            build_dir: PathBuf::from("build"),
            renderer_logo: PathBuf::from("src/renderer/src/assets/images/logo.png"),
            methods: Method::default_order(),
            procedural_fallback: true,
            container: ContainerBackend::Iconutil,
            ico: false,
        }
    }
}

impl IconConfig {
    pub fn load(path: &Path) -> Result<IconConfig, IconError> {
        let content = fs::read_to_string(path).map_err(|e| IconError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| IconError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load `path` if given, otherwise `<root>/icons.json` if it exists,
    /// otherwise the defaults.
    pub fn discover(root: &Path, path: Option<&Path>) -> Result<IconConfig, IconError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = root.join(CONFIG_FILENAME);
                if default_path.is_file() {
                    Self::load(&default_path)
                } else {
                    Ok(IconConfig::default())
                }
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), IconError> {
        let content = serde_json::to_string_pretty(self).map_err(|e| IconError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, content).map_err(|e| IconError::io(path, e))
    }

    pub fn layout(&self, root: &Path) -> BundleLayout {
        BundleLayout::new(root, &self.svg, &self.build_dir, &self.renderer_logo)
    }
}
