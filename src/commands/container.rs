use std::path::{Path, PathBuf};

use icon_core::container::{assemble_icns, write_ico};
use icon_core::{ContainerOutcome, IconConfig, IconError};

use crate::commands::print_progress;

/// Build `icon.icns` from an existing `build/icons/` directory.
pub fn run_icns(root: &Path, config: &IconConfig) -> Result<ContainerOutcome, IconError> {
    let layout = config.layout(root);
    println!(
        "Assembling {} with {}",
        layout.icns.display(),
        config.container
    );

    let outcome = assemble_icns(&layout, config.container, Some(print_progress))?;
    match &outcome {
        ContainerOutcome::Created(path) => println!("Created {}", path.display()),
        ContainerOutcome::Skipped(reason) => println!("Skipped: {}", reason),
    }
    Ok(outcome)
}

/// Build `icon.ico` from an existing `build/icons/` directory.
pub fn run_ico(root: &Path, config: &IconConfig) -> Result<PathBuf, IconError> {
    let layout = config.layout(root);
    println!("Writing {}", layout.ico.display());

    let path = write_ico(&layout)?;
    println!("Created {}", path.display());
    Ok(path)
}
