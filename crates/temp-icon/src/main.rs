//! Temporary icon generator for Tutu Studio.
//!
//! Draws the placeholder badge once at 512 px and derives the whole bundle
//! from it, so packaging works before the real SVG logo exists.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use icon_core::batch::BatchReport;
use icon_core::procedural::{BASE_SIZE, BadgePainter, BadgeStyle, resample_sizes, write_aliases};
use icon_core::progress::{Progress, ProgressStatus};
use icon_core::{BundleLayout, IconConfig, IconError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "temp-icon")]
#[command(about = "Draw a temporary Tutu Studio icon bundle")]
struct Cli {
    /// Project root the bundle paths are relative to
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Config file (default: <root>/icons.json if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "warn,temp_icon=debug,icon_core=debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = IconConfig::discover(&cli.root, cli.config.as_deref()).and_then(|config| {
        let painter = BadgePainter::new(BadgeStyle::temporary());
        generate(&config.layout(&cli.root), &painter)
    });

    match result {
        Ok(report) => {
            println!("\nCreated {} images", report.created.len());
            for (path, reason) in &report.failed {
                println!("  failed {}: {}", path.display(), reason);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn print_progress(p: Progress) {
    match p.status {
        ProgressStatus::Done => println!("  Created {}", p.target),
        ProgressStatus::Failed(reason) => println!("  FAILED {}: {}", p.target, reason),
        ProgressStatus::Skipped(reason) => println!("  Skipped {}: {}", p.target, reason),
        ProgressStatus::Started => {}
    }
}

/// Draw the badge at [`BASE_SIZE`] and write the size set, the aliases and
/// their copies under `layout`.
fn generate(layout: &BundleLayout, painter: &BadgePainter) -> Result<BatchReport, IconError> {
    fs::create_dir_all(&layout.icons_dir).map_err(|e| IconError::io(&layout.icons_dir, e))?;

    println!("Drawing {}x{} badge", BASE_SIZE, BASE_SIZE);
    let base = painter.draw(BASE_SIZE);
    debug!(size = BASE_SIZE, "drew base image");

    let mut report = resample_sizes(&base, layout, Some(print_progress));
    report.merge(write_aliases(&base, layout, Some(print_progress)));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use icon_core::sizes::SIZES;
    use tempfile::tempdir;

    #[test]
    fn generates_full_bundle() {
        let root = tempdir().unwrap();
        let layout = IconConfig::default().layout(root.path());
        let painter = BadgePainter::without_fonts(BadgeStyle::temporary());

        let report = generate(&layout, &painter).unwrap();

        assert!(report.is_complete());
        for size in SIZES {
            assert_eq!(
                image::image_dimensions(layout.size_png(size)).unwrap(),
                (size, size)
            );
        }
        assert_eq!(image::image_dimensions(&layout.icon).unwrap(), (512, 512));
        assert_eq!(image::image_dimensions(&layout.logo).unwrap(), (256, 256));
        assert_eq!(image::image_dimensions(&layout.tray).unwrap(), (32, 32));
        assert_eq!(
            fs::read(&layout.tray_dark).unwrap(),
            fs::read(&layout.tray).unwrap()
        );
        assert!(layout.renderer_logo.exists());
    }

    #[test]
    fn base_size_matches_main_icon() {
        let root = tempdir().unwrap();
        let layout = IconConfig::default().layout(root.path());
        let painter = BadgePainter::without_fonts(BadgeStyle::temporary());

        generate(&layout, &painter).unwrap();

        assert_eq!(
            fs::read(layout.size_png(BASE_SIZE)).unwrap(),
            fs::read(&layout.icon).unwrap()
        );
    }

    #[test]
    fn rerun_overwrites_identically() {
        let root = tempdir().unwrap();
        let layout = IconConfig::default().layout(root.path());
        let painter = BadgePainter::without_fonts(BadgeStyle::temporary());

        generate(&layout, &painter).unwrap();
        let first = fs::read(layout.size_png(16)).unwrap();
        generate(&layout, &painter).unwrap();

        assert_eq!(fs::read(layout.size_png(16)).unwrap(), first);
    }
}
