//! Compliance policy: the extension allow-list, exclusion list and skip-list.
//!
//! The built-in tables are plain constants; a [`CompliancePolicy`] is an
//! immutable value built from them (and optionally extended) that the
//! checker and walker carry around.

use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Durable formats grouped by category, in display order.
pub const DURABLE_CATEGORIES: &[(&str, &[&str])] = &[
    ("Structured data", &[".db", ".sqlite", ".sqlite3", ".json", ".jsonl"]),
    ("Documents", &[".md", ".markdown", ".txt", ".text", ".rst"]),
    ("Archives", &[".zip"]),
    ("Images", &[".jpg", ".jpeg", ".png", ".webp", ".gif"]),
    ("Data", &[".csv", ".tsv", ".xml", ".yaml", ".yml"]),
];

/// File names never counted as data during format detection.
pub const EXCLUDE_PATTERNS: &[&str] = &[
    "README.md",
    "README.txt",
    "CLAUDE.md",
    "CHANGELOG.md",
    ".gitignore",
    ".gitattributes",
    "pyproject.toml",
    "setup.py",
    "setup.cfg",
    "requirements.txt",
];

/// Directory names never descended into during discovery.
pub const SKIP_DIRECTORIES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "__pycache__",
    ".pytest_cache",
    ".venv",
    "venv",
    ".env",
    "env",
    ".tox",
    ".nox",
    "dist",
    "build",
    ".mypy_cache",
    ".ruff_cache",
    "site-packages",
];

/// Directory name suffixes never descended into during discovery.
pub const SKIP_SUFFIXES: &[&str] = &[".egg-info"];

/// README candidates, in priority order.
pub const README_NAMES: &[&str] = &["README.md", "README.txt", "readme.md", "readme.txt"];

/// Maximum directory depth for format detection.
pub const DEFAULT_FORMAT_SCAN_DEPTH: usize = 2;

/// Maximum characters kept in a README summary.
pub const MAX_README_SUMMARY_LENGTH: usize = 500;

/// Subdirectory holding a previously generated site.
pub const SITE_DIR: &str = "site";

/// Entry page of a generated site.
pub const SITE_INDEX: &str = "index.html";

/// Normalize an extension to lowercase with a leading dot.
///
/// `"JSON"`, `"json"` and `".json"` all become `".json"`.
pub fn normalize_extension(extension: &str) -> String {
    let ext = extension.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// Immutable rule set used by the checker, the format detector and the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompliancePolicy {
    durable_extensions: BTreeSet<String>,
    excluded_files: BTreeSet<String>,
    skip_directories: BTreeSet<String>,
    skip_suffixes: Vec<String>,
    readme_names: Vec<String>,
    format_scan_depth: usize,
    summary_max_length: usize,
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self {
            durable_extensions: DURABLE_CATEGORIES
                .iter()
                .flat_map(|(_, exts)| exts.iter())
                .map(|e| e.to_string())
                .collect(),
            excluded_files: EXCLUDE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            skip_directories: SKIP_DIRECTORIES.iter().map(|s| s.to_string()).collect(),
            skip_suffixes: SKIP_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            readme_names: README_NAMES.iter().map(|s| s.to_string()).collect(),
            format_scan_depth: DEFAULT_FORMAT_SCAN_DEPTH,
            summary_max_length: MAX_README_SUMMARY_LENGTH,
        }
    }
}

impl CompliancePolicy {
    /// The built-in policy, shared process-wide.
    pub fn builtin() -> &'static CompliancePolicy {
        static BUILTIN: OnceLock<CompliancePolicy> = OnceLock::new();
        BUILTIN.get_or_init(CompliancePolicy::default)
    }

    /// Treat an additional extension as durable.
    pub fn with_durable_extension(mut self, extension: &str) -> Self {
        self.durable_extensions.insert(normalize_extension(extension));
        self
    }

    /// Ignore an additional file name during format detection.
    pub fn with_excluded_file(mut self, name: impl Into<String>) -> Self {
        self.excluded_files.insert(name.into());
        self
    }

    /// Skip an additional directory name during discovery.
    pub fn with_skip_directory(mut self, name: impl Into<String>) -> Self {
        self.skip_directories.insert(name.into());
        self
    }

    /// Change the format detection depth.
    pub fn with_format_scan_depth(mut self, depth: usize) -> Self {
        self.format_scan_depth = depth;
        self
    }

    /// Change the README summary truncation length.
    pub fn with_summary_max_length(mut self, length: usize) -> Self {
        self.summary_max_length = length;
        self
    }

    /// Whether `extension` (any case, dot optional) is durable.
    pub fn is_durable(&self, extension: &str) -> bool {
        self.durable_extensions
            .contains(&normalize_extension(extension))
    }

    /// Whether a file name is excluded from format detection.
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.excluded_files.contains(file_name)
    }

    /// Whether discovery must not descend into a directory with this name.
    ///
    /// Hidden directories are always skipped.
    pub fn should_skip_directory(&self, name: &str) -> bool {
        name.starts_with('.')
            || self.skip_directories.contains(name)
            || self.skip_suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    /// README candidates in priority order.
    pub fn readme_names(&self) -> &[String] {
        &self.readme_names
    }

    /// All durable extensions, sorted.
    pub fn durable_extensions(&self) -> &BTreeSet<String> {
        &self.durable_extensions
    }

    /// Depth limit for format detection.
    pub fn format_scan_depth(&self) -> usize {
        self.format_scan_depth
    }

    /// README summary truncation length.
    pub fn summary_max_length(&self) -> usize {
        self.summary_max_length
    }
}
