use std::fs;
use std::io;
use std::path::Path;

/// Copy a file to `dest`, overwriting it. Creates the parent directory of
/// `dest` if it doesn't exist.
pub fn copy_file(src: &Path, dest: &Path) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::copy(src, dest)?;
    Ok(())
}

/// Write bytes to `dest`, creating its parent directory if needed.
pub fn write_file(dest: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(dest, data)
}

/// True if `path` is a regular file with at least one byte.
pub fn is_non_empty_file(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

/// Remove a file, treating "already gone" as success.
pub fn remove_file_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Remove a directory tree, treating "already gone" as success.
pub fn remove_dir_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copy_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("logo.png");
        fs::write(&src, b"logo bytes").unwrap();

        let dest = dir.path().join("src/renderer/assets/logo.png");
        copy_file(&src, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"logo bytes");
    }

    #[test]
    fn copy_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("tray.png");
        let dest = dir.path().join("tray_dark.png");
        fs::write(&src, b"new").unwrap();
        fs::write(&dest, b"old content").unwrap();

        copy_file(&src, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"new");
    }

    #[test]
    fn copy_missing_source_errors() {
        let dir = tempdir().unwrap();

        let result = copy_file(Path::new("/nonexistent/file.png"), &dir.path().join("out.png"));

        assert!(result.is_err());
    }

    #[test]
    fn non_empty_file_checks() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty.png");
        let full = dir.path().join("full.png");
        fs::write(&empty, b"").unwrap();
        fs::write(&full, b"x").unwrap();

        assert!(!is_non_empty_file(&empty));
        assert!(is_non_empty_file(&full));
        assert!(!is_non_empty_file(&dir.path().join("missing.png")));
        assert!(!is_non_empty_file(dir.path()));
    }

    #[test]
    fn remove_missing_paths_is_ok() {
        let dir = tempdir().unwrap();

        remove_file_if_exists(&dir.path().join("gone.png")).unwrap();
        remove_dir_if_exists(&dir.path().join("gone.iconset")).unwrap();
    }

    #[test]
    fn remove_dir_removes_tree() {
        let dir = tempdir().unwrap();
        let staging = dir.path().join("icon.iconset");
        fs::create_dir_all(&staging).unwrap();
        fs::write(staging.join("icon_16x16.png"), b"png").unwrap();

        remove_dir_if_exists(&staging).unwrap();

        assert!(!staging.exists());
    }
}
