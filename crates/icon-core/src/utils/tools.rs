use std::ffi::OsStr;
use std::process::{Command, Output};

use tracing::debug;

use crate::error::IconError;

/// Check if an external tool is on PATH.
pub fn tool_available(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Run an external tool to completion and return its captured output.
///
/// Blocks until the tool exits; there is no timeout. A tool missing from PATH
/// is reported as [`IconError::ToolNotFound`] without spawning anything.
pub fn run_tool<I, S>(tool: &str, args: I) -> Result<Output, IconError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let program = which::which(tool).map_err(|_| IconError::ToolNotFound(tool.to_string()))?;

    let mut command = Command::new(program);
    command.args(args);
    debug!(command = ?command, "running tool");

    let output = command.output().map_err(|e| IconError::ToolFailed {
        tool: tool.to_string(),
        exit_code: None,
        stderr: e.to_string(),
    })?;

    if !output.status.success() {
        return Err(IconError::ToolFailed {
            tool: tool.to_string(),
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING_TOOL: &str = "tutu-icons-no-such-tool";

    #[test]
    fn missing_tool_is_not_available() {
        assert!(!tool_available(MISSING_TOOL));
    }

    #[test]
    fn running_missing_tool_reports_not_found() {
        let result = run_tool(MISSING_TOOL, ["--version"]);

        assert!(matches!(result, Err(IconError::ToolNotFound(name)) if name == MISSING_TOOL));
    }

    #[cfg(unix)]
    #[test]
    fn failing_tool_reports_exit_code() {
        let result = run_tool("sh", ["-c", "echo oops >&2; exit 3"]);

        assert!(matches!(
            result,
            Err(IconError::ToolFailed { exit_code: Some(3), ref stderr, .. }) if stderr.contains("oops")
        ));
    }

    #[cfg(unix)]
    #[test]
    fn successful_tool_captures_stdout() {
        let output = run_tool("sh", ["-c", "printf png"]).unwrap();

        assert_eq!(output.stdout, b"png");
    }
}
