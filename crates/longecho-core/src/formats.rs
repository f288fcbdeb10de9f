//! Durable format detection.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::policy::CompliancePolicy;

/// Whether `extension` is durable under the built-in policy.
///
/// Case-insensitive; the leading dot is optional.
pub fn is_durable_format(extension: &str) -> bool {
    CompliancePolicy::builtin().is_durable(extension)
}

/// Collect file extensions under `path` using the built-in policy.
pub fn detect_formats(path: impl AsRef<Path>, max_depth: usize) -> BTreeSet<String> {
    detect_formats_with(CompliancePolicy::builtin(), path, max_depth)
}

/// Collect the lowercased, dot-prefixed extensions of files under `path`.
///
/// A file at depth `d` (files directly inside `path` are at depth 0) is
/// seen iff `d <= max_depth`. Hidden entries and excluded names are
/// skipped; unreadable directories contribute nothing.
pub fn detect_formats_with(
    policy: &CompliancePolicy,
    path: impl AsRef<Path>,
    max_depth: usize,
) -> BTreeSet<String> {
    let walker = WalkDir::new(path.as_ref())
        .follow_links(true)
        .max_depth(max_depth.saturating_add(1))
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    let mut formats = BTreeSet::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if entry.depth() == 0 || !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if policy.is_excluded(&name) {
            continue;
        }

        if let Some(ext) = longecho_common_fs::dotted_extension(entry.path()) {
            formats.insert(ext);
        }
    }
    formats
}

/// The durable subset of `formats`.
pub fn durable_subset(policy: &CompliancePolicy, formats: &BTreeSet<String>) -> BTreeSet<String> {
    formats
        .iter()
        .filter(|ext| policy.is_durable(ext))
        .cloned()
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
