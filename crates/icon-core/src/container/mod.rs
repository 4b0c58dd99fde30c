//! Platform icon containers.
//!
//! The macOS `.icns` is normally built by staging an `.iconset` directory and
//! handing it to `iconutil`. The `native` backend writes the same entries with
//! the `icns` crate instead. The Windows `.ico` is always written natively.

mod iconutil;
mod native;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IconError;
use crate::layout::BundleLayout;
use crate::progress::Progress;

pub use iconutil::{ICONUTIL, assemble_with_iconutil, stage_iconset};
pub use native::{write_ico, write_native_icns};

/// Source size and `.iconset` file name for every ICNS entry.
pub const ICONSET_MAPPINGS: [(u32, &str); 10] = [
    (16, "icon_16x16.png"),
    (32, "icon_16x16@2x.png"),
    (32, "icon_32x32.png"),
    (64, "icon_32x32@2x.png"),
    (128, "icon_128x128.png"),
    (256, "icon_128x128@2x.png"),
    (256, "icon_256x256.png"),
    (512, "icon_256x256@2x.png"),
    (512, "icon_512x512.png"),
    (1024, "icon_512x512@2x.png"),
];

/// How the macOS container gets built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerBackend {
    /// Stage an iconset and run `iconutil`; skipped when it isn't installed.
    #[default]
    Iconutil,
    /// Write the ICNS in-process.
    Native,
    /// Don't build a container.
    Skip,
}

impl fmt::Display for ContainerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContainerBackend::Iconutil => "iconutil",
            ContainerBackend::Native => "native",
            ContainerBackend::Skip => "skip",
        })
    }
}

impl FromStr for ContainerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iconutil" => Ok(ContainerBackend::Iconutil),
            "native" => Ok(ContainerBackend::Native),
            "skip" | "none" => Ok(ContainerBackend::Skip),
            _ => Err(format!(
                "unknown container backend '{}' (expected iconutil, native or skip)",
                s
            )),
        }
    }
}

/// Result of a container step that didn't fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerOutcome {
    Created(PathBuf),
    Skipped(String),
}

/// Build `build/icon.icns` from `build/icons/` with the chosen backend.
pub fn assemble_icns<F>(
    layout: &BundleLayout,
    backend: ContainerBackend,
    on_progress: Option<F>,
) -> Result<ContainerOutcome, IconError>
where
    F: FnMut(Progress),
{
    match backend {
        ContainerBackend::Iconutil => assemble_with_iconutil(layout, ICONUTIL, on_progress),
        ContainerBackend::Native => write_native_icns(layout).map(ContainerOutcome::Created),
        ContainerBackend::Skip => Ok(ContainerOutcome::Skipped(
            "container assembly disabled".to_string(),
        )),
    }
}
