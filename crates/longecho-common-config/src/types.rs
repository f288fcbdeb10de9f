//! Configuration types.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongechoConfig {
    /// Adjustments to the compliance policy.
    pub policy: PolicyConfig,
    /// Defaults for recursive discovery.
    pub discovery: DiscoveryConfig,
}

/// Additions and overrides applied on top of the built-in compliance policy.
///
/// The built-in lists can only be extended, never shrunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Extra extensions to treat as durable (with or without a leading dot).
    pub extra_durable_extensions: Vec<String>,
    /// Extra directory names to skip during discovery.
    pub extra_skip_directories: Vec<String>,
    /// Extra file names to ignore during format detection.
    pub extra_excluded_files: Vec<String>,
    /// Depth limit for format detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format_scan_depth: Option<usize>,
    /// Maximum README summary length in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_max_length: Option<usize>,
}

/// Discovery defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Maximum recursion depth (unlimited when absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
}
