use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for icon generation.
///
/// Most variants are soft failures: the caller reports them and moves on to
/// the next method, size or optional step. Only [`IconError::SvgNotFound`] and
/// [`IconError::NoWorkingMethod`] end a conversion run.
#[derive(Debug)]
pub enum IconError {
    SvgNotFound(PathBuf),
    ToolNotFound(String),
    ToolFailed {
        tool: String,
        exit_code: Option<i32>,
        stderr: String,
    },
    EmptyOutput(PathBuf),
    Render { path: PathBuf, reason: String },
    Io { path: PathBuf, source: io::Error },
    NoWorkingMethod,
    Config { path: PathBuf, reason: String },
}

impl IconError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        IconError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn render(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        IconError::Render {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for IconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconError::SvgNotFound(path) => write!(f, "SVG file not found: {}", path.display()),
            IconError::ToolNotFound(tool) => write!(f, "'{}' not found on PATH", tool),
            IconError::ToolFailed {
                tool,
                exit_code,
                stderr,
            } => {
                match exit_code {
                    Some(code) => write!(f, "'{}' exited with status {}", tool, code)?,
                    None => write!(f, "'{}' could not be run", tool)?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            IconError::EmptyOutput(path) => {
                write!(f, "no output produced at {}", path.display())
            }
            IconError::Render { path, reason } => {
                write!(f, "failed to render {}: {}", path.display(), reason)
            }
            IconError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            IconError::NoWorkingMethod => write!(f, "no working conversion method found"),
            IconError::Config { path, reason } => {
                write!(f, "invalid config {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for IconError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IconError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
