use std::fs;
use std::path::Path;

use icon_core::select::probe;
use icon_core::utils::tools::tool_available;
use icon_core::{IconConfig, IconError, Method};

/// Availability of one configured conversion method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodStatus {
    pub method: Method,
    /// External tool the method runs, `None` for the built-in renderer.
    pub tool: Option<&'static str>,
    pub installed: bool,
    /// Probe outcome; `Err` holds the reason it failed.
    pub probe: Result<(), String>,
}

impl MethodStatus {
    pub fn works(&self) -> bool {
        self.installed && self.probe.is_ok()
    }
}

/// Probe every configured method against the SVG and print a table.
///
/// Fails only when the SVG itself is missing.
pub fn run(root: &Path, config: &IconConfig) -> Result<Vec<MethodStatus>, IconError> {
    let layout = config.layout(root);
    if !layout.svg.is_file() {
        return Err(IconError::SvgNotFound(layout.svg.clone()));
    }
    fs::create_dir_all(&layout.build_dir).map_err(|e| IconError::io(&layout.build_dir, e))?;

    println!("Checking conversion methods for {}", layout.svg.display());
    let mut statuses = Vec::with_capacity(config.methods.len());
    for &method in &config.methods {
        let tool = method.tool();
        let installed = tool.is_none_or(tool_available);
        let outcome = if installed {
            probe(method.rasterizer().as_ref(), &layout).map_err(|e| e.to_string())
        } else {
            Err("not installed".to_string())
        };

        let status = MethodStatus {
            method,
            tool,
            installed,
            probe: outcome,
        };
        print_status(&status);
        statuses.push(status);
    }

    match statuses.iter().find(|s| s.works()) {
        Some(status) => println!("\nWould use: {}", status.method),
        None if config.procedural_fallback => println!("\nWould use: procedural fallback"),
        None => println!("\nNo working conversion method"),
    }

    Ok(statuses)
}

fn print_status(status: &MethodStatus) {
    let tool = status.tool.unwrap_or("built-in");
    match &status.probe {
        Ok(()) => println!("  {:<14} {:<14} ok", status.method, tool),
        Err(reason) => println!("  {:<14} {:<14} FAILED ({})", status.method, tool, reason),
    }
}
