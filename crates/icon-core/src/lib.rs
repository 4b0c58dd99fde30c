//! Icon asset generation for Tutu Studio.
//!
//! Renders the master SVG into the fixed bundle layout under `build/`, falls
//! back to a procedurally drawn badge when no renderer works, and assembles
//! the platform containers.

pub mod batch;
pub mod config;
pub mod container;
pub mod error;
pub mod layout;
pub mod procedural;
pub mod progress;
pub mod raster;
pub mod select;
pub mod sizes;
pub mod utils;

pub use batch::BatchReport;
pub use config::IconConfig;
pub use container::{ContainerBackend, ContainerOutcome};
pub use error::IconError;
pub use layout::BundleLayout;
pub use progress::{Progress, ProgressAction, ProgressStatus};
pub use raster::{Method, Rasterizer};
pub use select::Selection;
