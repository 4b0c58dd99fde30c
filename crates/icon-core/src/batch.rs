use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::IconError;
use crate::layout::BundleLayout;
use crate::progress::{Progress, ProgressAction, ProgressStatus, display_name, emit};
use crate::raster::Rasterizer;
use crate::sizes::SIZES;
use crate::utils::file_ops::copy_file;

/// Files written by a batch, and the ones that failed with the reason.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub created: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn merge(&mut self, other: BatchReport) {
        self.created.extend(other.created);
        self.failed.extend(other.failed);
    }

    /// Record the outcome for `path`, reporting it as a progress event.
    pub(crate) fn record<F>(
        &mut self,
        on_progress: &mut Option<F>,
        action: ProgressAction,
        index: usize,
        total: usize,
        path: &Path,
        result: Result<(), IconError>,
    ) where
        F: FnMut(Progress),
    {
        let status = match result {
            Ok(()) => {
                self.created.push(path.to_path_buf());
                ProgressStatus::Done
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to write icon");
                let reason = e.to_string();
                self.failed.push((path.to_path_buf(), reason.clone()));
                ProgressStatus::Failed(reason)
            }
        };
        emit(on_progress, action, status, index, total, display_name(path));
    }
}

/// Render every size of [`SIZES`] into `build/icons/` with `rasterizer`.
///
/// A size that fails is recorded in the report and the batch carries on. The
/// only hard error is being unable to create the icons directory.
pub fn render_sizes<F>(
    rasterizer: &dyn Rasterizer,
    layout: &BundleLayout,
    mut on_progress: Option<F>,
) -> Result<BatchReport, IconError>
where
    F: FnMut(Progress),
{
    fs::create_dir_all(&layout.icons_dir).map_err(|e| IconError::io(&layout.icons_dir, e))?;

    let mut report = BatchReport::default();
    let total = SIZES.len();
    for (index, size) in SIZES.into_iter().enumerate() {
        let output = layout.size_png(size);
        let result = rasterizer.rasterize(&layout.svg, &output, size);
        report.record(&mut on_progress, ProgressAction::Rendering, index, total, &output, result);
    }

    Ok(report)
}

/// Render the main aliases (`icon.png`, `logo.png`, `tray_icon.png`) with
/// `rasterizer`, then copy them to their derived destinations.
pub fn render_aliases<F>(
    rasterizer: &dyn Rasterizer,
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
        let result = rasterizer.rasterize(&layout.svg, output, size);
        report.record(&mut on_progress, ProgressAction::Rendering, index, total, output, result);
    }

    report.merge(copy_derived(layout, &mut on_progress));
    report
}

/// Copy the tray icon to its light and dark variants and the logo to the
/// renderer asset path. Sources that don't exist are skipped.
pub(crate) fn copy_derived<F>(layout: &BundleLayout, on_progress: &mut Option<F>) -> BatchReport
where
    F: FnMut(Progress),
{
    let copies = [
        (&layout.tray, &layout.tray_light),
        (&layout.tray, &layout.tray_dark),
        (&layout.logo, &layout.renderer_logo),
    ];

    let mut report = BatchReport::default();
    let total = copies.len();
    for (index, (src, dest)) in copies.into_iter().enumerate() {
        if !src.is_file() {
            emit(
                on_progress,
                ProgressAction::Copying,
                ProgressStatus::Skipped(format!("{} missing", display_name(src))),
                index,
                total,
                display_name(dest),
            );
            continue;
        }
        let result = copy_file(src, dest).map_err(|e| IconError::io(dest, e));
        report.record(on_progress, ProgressAction::Copying, index, total, dest, result);
    }

    report
}
