//! Path manipulation utilities.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving `.` and `..` without hitting the filesystem.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => components.push(Component::Prefix(p)),
            Component::RootDir => {
                components.clear();
                components.push(Component::RootDir);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(last) = components.last() {
                    match last {
                        Component::Normal(_) => {
                            components.pop();
                        }
                        Component::ParentDir => {
                            components.push(Component::ParentDir);
                        }
                        _ => {} // Don't pop prefix or root dir
                    }
                } else {
                    components.push(Component::ParentDir);
                }
            }
            Component::Normal(c) => components.push(Component::Normal(c)),
        }
    }

    if components.is_empty() {
        PathBuf::from(".")
    } else {
        components.iter().collect()
    }
}

/// Best-effort absolute form of a path.
///
/// Uses the canonical (symlink-resolved) path when the target exists,
/// otherwise joins onto the current directory and normalizes lexically.
pub fn absolute(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        return normalize(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize(cwd.join(path)),
        Err(_) => normalize(path),
    }
}

/// Check that `path` is `root` itself or lies beneath it.
///
/// Both sides are compared component-wise after lexical normalization, so
/// callers wanting symlink safety should pass canonical paths.
pub fn is_within(path: impl AsRef<Path>, root: impl AsRef<Path>) -> bool {
    normalize(path).starts_with(normalize(root))
}

/// Convert a path to a Unix-style string (forward slashes).
pub fn to_unix_string(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/")
}
