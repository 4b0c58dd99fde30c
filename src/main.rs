use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use icon_core::{ContainerBackend, IconConfig, IconError};
use tracing_subscriber::EnvFilter;

use tutu_icons::commands;

#[derive(Parser)]
#[command(name = "tutu-icons")]
#[command(about = "Generate Tutu Studio icon assets from the SVG logo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Project root the bundle paths are relative to
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (default: <root>/icons.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SVG logo to convert, overriding the config
    #[arg(long, global = true)]
    svg: Option<PathBuf>,

    /// Fail instead of drawing a fallback icon when no method works
    #[arg(long, global = true)]
    no_fallback: bool,

    /// How to build the macOS container: iconutil, native or skip
    #[arg(long, global = true)]
    container: Option<ContainerBackend>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the SVG into the full icon bundle (default)
    Convert,
    /// Show which conversion methods are installed and working
    Check,
    /// Build icon.icns from an existing build/icons directory
    Icns,
    /// Build icon.ico from an existing build/icons directory
    Ico,
}

const QUIET_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,tutu_icons=debug,icon_core=debug";

/// `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let filter = if verbose { VERBOSE_FILTER } else { QUIET_FILTER };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

impl Cli {
    fn load_config(&self) -> Result<IconConfig, IconError> {
        let mut config = IconConfig::discover(&self.root, self.config.as_deref())?;
        if let Some(svg) = &self.svg {
            config.svg = svg.clone();
        }
        if self.no_fallback {
            config.procedural_fallback = false;
        }
        if let Some(container) = self.container {
            config.container = container;
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command.unwrap_or(Commands::Convert) {
        Commands::Convert => commands::convert::run(&cli.root, &config).map(|_| ()),
        Commands::Check => commands::check::run(&cli.root, &config).map(|_| ()),
        Commands::Icns => commands::container::run_icns(&cli.root, &config).map(|_| ()),
        Commands::Ico => commands::container::run_ico(&cli.root, &config).map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
