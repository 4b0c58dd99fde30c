use std::ffi::OsStr;
use std::fs;

use tracing::{debug, warn};

use crate::container::{ContainerOutcome, ICONSET_MAPPINGS};
use crate::error::IconError;
use crate::layout::BundleLayout;
use crate::progress::{Progress, ProgressAction, ProgressStatus, display_name, emit};
use crate::utils::file_ops::{copy_file, remove_dir_if_exists};
use crate::utils::tools::{run_tool, tool_available};

/// The macOS icon packaging tool.
pub const ICONUTIL: &str = "iconutil";

/// Copy the generated sizes into `build/icon.iconset/` under the names
/// `iconutil` expects. Missing sources are skipped. Returns the number of
/// files staged.
pub fn stage_iconset<F>(
    layout: &BundleLayout,
    on_progress: &mut Option<F>,
) -> Result<usize, IconError>
where
    F: FnMut(Progress),
{
    fs::create_dir_all(&layout.iconset_dir).map_err(|e| IconError::io(&layout.iconset_dir, e))?;

    let total = ICONSET_MAPPINGS.len();
    let mut staged = 0;
    for (index, (size, name)) in ICONSET_MAPPINGS.into_iter().enumerate() {
        let src = layout.size_png(size);
        if !src.is_file() {
            emit(
                on_progress,
                ProgressAction::Staging,
                ProgressStatus::Skipped(format!("{} missing", display_name(&src))),
                index,
                total,
                name,
            );
            continue;
        }

        let dest = layout.iconset_dir.join(name);
        copy_file(&src, &dest).map_err(|e| IconError::io(&dest, e))?;
        emit(on_progress, ProgressAction::Staging, ProgressStatus::Done, index, total, name);
        staged += 1;
    }

    Ok(staged)
}

/// Stage the iconset and run `tool -c icns <iconset> -o <icns>`.
///
/// Returns [`ContainerOutcome::Skipped`] without touching anything when the
/// tool isn't on PATH. On success the staging directory is removed; on
/// failure it is left in place and the tool's error is returned.
pub fn assemble_with_iconutil<F>(
    layout: &BundleLayout,
    tool: &str,
    mut on_progress: Option<F>,
) -> Result<ContainerOutcome, IconError>
where
    F: FnMut(Progress),
{
    if !tool_available(tool) {
        debug!(tool, "packaging tool not found");
        return Ok(ContainerOutcome::Skipped(format!("{} not found", tool)));
    }

    let staged = stage_iconset(layout, &mut on_progress)?;
    debug!(staged, dir = %layout.iconset_dir.display(), "staged iconset");

    let icns_name = display_name(&layout.icns);
    emit(
        &mut on_progress,
        ProgressAction::Packaging,
        ProgressStatus::Started,
        0,
        1,
        icns_name.as_str(),
    );

    let args = [
        OsStr::new("-c"),
        OsStr::new("icns"),
        layout.iconset_dir.as_os_str(),
        OsStr::new("-o"),
        layout.icns.as_os_str(),
    ];
    if let Err(e) = run_tool(tool, args) {
        emit(
            &mut on_progress,
            ProgressAction::Packaging,
            ProgressStatus::Failed(e.to_string()),
            0,
            1,
            icns_name.as_str(),
        );
        return Err(e);
    }

    if let Err(e) = remove_dir_if_exists(&layout.iconset_dir) {
        warn!(dir = %layout.iconset_dir.display(), error = %e, "could not remove iconset");
    }
    emit(
        &mut on_progress,
        ProgressAction::Packaging,
        ProgressStatus::Done,
        0,
        1,
        icns_name.as_str(),
    );

    Ok(ContainerOutcome::Created(layout.icns.clone()))
}
