use std::path::{Path, PathBuf};

use icon_core::batch::{render_aliases, render_sizes};
use icon_core::container::{assemble_icns, write_ico};
use icon_core::procedural::{BadgePainter, BadgeStyle, draw_sizes, write_aliases};
use icon_core::select::select_method;
use icon_core::{BatchReport, ContainerOutcome, IconConfig, IconError, Rasterizer, Selection};
use tracing::warn;

use crate::commands::print_progress;

/// What a conversion run produced.
#[derive(Debug)]
pub struct ConvertReport {
    /// Name of the method that passed the probe, or `procedural`.
    pub method: String,
    pub images: BatchReport,
    /// Container outcome; an `Err` holds the reason it failed.
    pub icns: Result<ContainerOutcome, String>,
    /// Present only when ICO output is enabled.
    pub ico: Option<Result<PathBuf, String>>,
}

/// Convert the SVG logo into the full icon bundle under `root`.
///
/// Only method selection can fail the run (missing SVG, or no working method
/// with the procedural fallback disabled). Per-image and container failures
/// are recorded in the report.
pub fn run(root: &Path, config: &IconConfig) -> Result<ConvertReport, IconError> {
    let layout = config.layout(root);
    println!("Converting {}", layout.svg.display());

    let candidates: Vec<Box<dyn Rasterizer>> =
        config.methods.iter().map(|method| method.rasterizer()).collect();

    println!("Selecting conversion method...");
    let selection = select_method(
        candidates,
        &layout,
        config.procedural_fallback,
        Some(print_progress),
    )?;
    let method = selection.name().to_string();

    let images = match selection {
        Selection::Method(rasterizer) => {
            println!("Using {}", method);
            let mut images = render_sizes(rasterizer.as_ref(), &layout, Some(print_progress))?;
            images.merge(render_aliases(rasterizer.as_ref(), &layout, Some(print_progress)));
            images
        }
        Selection::Procedural => {
            println!("No working conversion method, drawing a fallback icon");
            let painter = BadgePainter::new(BadgeStyle::fallback());
            let (mut images, base) = draw_sizes(&painter, &layout, Some(print_progress));
            images.merge(write_aliases(&base, &layout, Some(print_progress)));
            images
        }
    };

    println!("Assembling {}...", layout.icns.display());
    let icns = assemble_icns(&layout, config.container, Some(print_progress)).map_err(|e| {
        warn!(error = %e, "icns assembly failed");
        e.to_string()
    });

    let ico = config.ico.then(|| {
        println!("Writing {}...", layout.ico.display());
        write_ico(&layout).map_err(|e| {
            warn!(error = %e, "ico assembly failed");
            e.to_string()
        })
    });

    let report = ConvertReport {
        method,
        images,
        icns,
        ico,
    };
    print_summary(&report);
    Ok(report)
}

fn print_summary(report: &ConvertReport) {
    println!();
    println!("Method: {}", report.method);
    println!("Created {} images", report.images.created.len());
    if !report.images.is_complete() {
        println!("Failed {} images:", report.images.failed.len());
        for (path, reason) in &report.images.failed {
            println!("  {}: {}", path.display(), reason);
        }
    }

    match &report.icns {
        Ok(ContainerOutcome::Created(path)) => println!("Created {}", path.display()),
        Ok(ContainerOutcome::Skipped(reason)) => println!("Skipped icns: {}", reason),
        Err(reason) => println!("icns failed: {}", reason),
    }

    match &report.ico {
        Some(Ok(path)) => println!("Created {}", path.display()),
        Some(Err(reason)) => println!("ico failed: {}", reason),
        None => {}
    }
}
