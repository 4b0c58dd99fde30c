use std::path::Path;

/// What a step is doing when it reports progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressAction {
    Probing,
    Rendering,
    Drawing,
    Copying,
    Staging,
    Packaging,
}

/// Outcome of a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressStatus {
    Started,
    Done,
    Failed(String),
    Skipped(String),
}

/// One progress event. `index`/`total` position the step within its phase;
/// `target` is the file or method the step works on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub action: ProgressAction,
    pub status: ProgressStatus,
    pub index: usize,
    pub total: usize,
    pub target: String,
}

/// Short name of a path for progress output.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Emit to an optional callback; helper shared by the phase functions.
pub(crate) fn emit<F>(
    on_progress: &mut Option<F>,
    action: ProgressAction,
    status: ProgressStatus,
    index: usize,
    total: usize,
    target: impl Into<String>,
) where
    F: FnMut(Progress),
{
    if let Some(callback) = on_progress.as_mut() {
        callback(Progress {
            action,
            status,
            index,
            total,
            target: target.into(),
        });
    }
}
