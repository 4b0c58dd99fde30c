pub mod check;
pub mod container;
pub mod convert;

use icon_core::{Progress, ProgressAction, ProgressStatus};

fn format_action(action: ProgressAction) -> &'static str {
    match action {
        ProgressAction::Probing => "Probing",
        ProgressAction::Rendering => "Rendering",
        ProgressAction::Drawing => "Drawing",
        ProgressAction::Copying => "Copying",
        ProgressAction::Staging => "Staging",
        ProgressAction::Packaging => "Packaging",
    }
}

/// Format one progress event as a console line, or `None` for events that
/// only mark the start of a step that reports again when it finishes.
pub fn format_progress(p: &Progress) -> Option<String> {
    let prefix = format!(
        "{} [{}/{}]: {}",
        format_action(p.action),
        p.index + 1,
        p.total,
        p.target
    );
    match &p.status {
        ProgressStatus::Started if p.action == ProgressAction::Probing => {
            Some(format!("{}...", prefix))
        }
        ProgressStatus::Started => None,
        ProgressStatus::Done => Some(format!("{} ok", prefix)),
        ProgressStatus::Failed(reason) => Some(format!("{} FAILED ({})", prefix, reason)),
        ProgressStatus::Skipped(reason) => Some(format!("{} skipped ({})", prefix, reason)),
    }
}

/// Progress callback shared by the commands.
pub fn print_progress(p: Progress) {
    if let Some(line) = format_progress(&p) {
        println!("  {}", line);
    }
}
