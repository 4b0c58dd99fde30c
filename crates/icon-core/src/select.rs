use std::fs;

use tracing::{debug, warn};

use crate::error::IconError;
use crate::layout::BundleLayout;
use crate::progress::{Progress, ProgressAction, ProgressStatus, emit};
use crate::raster::Rasterizer;
use crate::sizes::PROBE_SIZE;
use crate::utils::file_ops::{is_non_empty_file, remove_file_if_exists};

/// How the rest of the run produces images.
pub enum Selection {
    /// The first rasterizer that passed the probe.
    Method(Box<dyn Rasterizer>),
    /// No rasterizer worked; draw the badge instead.
    Procedural,
}

impl Selection {
    pub fn name(&self) -> &str {
        match self {
            Selection::Method(rasterizer) => rasterizer.name(),
            Selection::Procedural => "procedural",
        }
    }
}

/// Probe one rasterizer: render the SVG at [`PROBE_SIZE`] into the disposable
/// probe file and check that a non-empty file came out. The probe file is
/// removed afterwards either way.
pub fn probe(rasterizer: &dyn Rasterizer, layout: &BundleLayout) -> Result<(), IconError> {
    let result = rasterizer
        .rasterize(&layout.svg, &layout.probe, PROBE_SIZE)
        .and_then(|()| {
            if is_non_empty_file(&layout.probe) {
                Ok(())
            } else {
                Err(IconError::EmptyOutput(layout.probe.clone()))
            }
        });

    if let Err(e) = remove_file_if_exists(&layout.probe) {
        warn!(path = %layout.probe.display(), error = %e, "could not remove probe output");
    }

    result
}

/// Pick the first rasterizer that passes [`probe`], in the given order.
///
/// Fails with [`IconError::SvgNotFound`] before probing if the SVG is missing.
/// If nothing passes, returns [`Selection::Procedural`] when
/// `procedural_fallback` is set and [`IconError::NoWorkingMethod`] otherwise.
pub fn select_method<F>(
    candidates: Vec<Box<dyn Rasterizer>>,
    layout: &BundleLayout,
    procedural_fallback: bool,
    mut on_progress: Option<F>,
) -> Result<Selection, IconError>
where
    F: FnMut(Progress),
{
    if !layout.svg.is_file() {
        return Err(IconError::SvgNotFound(layout.svg.clone()));
    }

    fs::create_dir_all(&layout.build_dir).map_err(|e| IconError::io(&layout.build_dir, e))?;

    let total = candidates.len();
    for (index, rasterizer) in candidates.into_iter().enumerate() {
        let name = rasterizer.name().to_string();
        emit(
            &mut on_progress,
            ProgressAction::Probing,
            ProgressStatus::Started,
            index,
            total,
            name.as_str(),
        );

        match probe(rasterizer.as_ref(), layout) {
            Ok(()) => {
                debug!(method = %name, "method passed probe");
                emit(
                    &mut on_progress,
                    ProgressAction::Probing,
                    ProgressStatus::Done,
                    index,
                    total,
                    name.as_str(),
                );
                return Ok(Selection::Method(rasterizer));
            }
            Err(e) => {
                debug!(method = %name, error = %e, "method failed probe");
                emit(
                    &mut on_progress,
                    ProgressAction::Probing,
                    ProgressStatus::Failed(e.to_string()),
                    index,
                    total,
                    name.as_str(),
                );
            }
        }
    }

    if procedural_fallback {
        Ok(Selection::Procedural)
    } else {
        Err(IconError::NoWorkingMethod)
    }
}
