//! File system utilities for longecho.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub mod error;
pub mod path;

pub use error::{FsError, Result};

/// Read a file as UTF-8 text.
///
/// The handle is closed before returning, whether or not the read succeeded.
/// Invalid UTF-8 surfaces as [`FsError::Read`].
pub fn read_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| FsError::read(path, e))
}

/// Write to a file atomically (write to temp, then rename).
pub fn write_atomic(path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let parent = path.parent().unwrap_or(Path::new("."));

    ensure_dir(parent)?;

    let mut temp_path = path.to_path_buf();
    if let Some(name) = path.file_name() {
        temp_path.set_file_name(format!(".{}.tmp", name.to_string_lossy()));
    } else {
        temp_path.push(".tmp");
    }

    {
        let mut file = File::create(&temp_path).map_err(|e| FsError::write(&temp_path, e))?;
        file.write_all(contents)
            .map_err(|e| FsError::write(&temp_path, e))?;
        file.sync_all().map_err(|e| FsError::write(&temp_path, e))?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FsError::write(path, e)
    })
}

/// Write string to file atomically.
pub fn write_string_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    write_atomic(path, contents.as_bytes())
}

/// Ensure a directory exists.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| FsError::write(path, e))?;
    }
    Ok(())
}

/// Lowercased extension with a leading dot, e.g. `".json"`.
///
/// Returns `None` for names without an extension, including dotfiles such
/// as `.gitignore` and names ending in a bare dot.
pub fn dotted_extension(path: impl AsRef<Path>) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_lowercase()))
}
