//! Fixed icon sizes.

/// Square pixel sizes written to `build/icons/`, smallest first.
pub const SIZES: [u32; 9] = [16, 24, 32, 48, 64, 128, 256, 512, 1024];

/// Size used to probe rasterization methods.
pub const PROBE_SIZE: u32 = 512;

/// Size of `build/icon.png`.
pub const ICON_SIZE: u32 = 512;

/// Size of `build/logo.png` and the renderer logo.
pub const LOGO_SIZE: u32 = 256;

/// Size of the tray icons.
pub const TRAY_SIZE: u32 = 32;

/// Sizes embedded in the Windows ICO, largest first.
pub const ICO_SIZES: [u32; 6] = [256, 128, 64, 48, 32, 16];

/// File name for one entry of the size set, e.g. `32x32.png`.
pub fn size_file_name(size: u32) -> String {
    format!("{}x{}.png", size, size)
}
