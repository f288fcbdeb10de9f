//! Archive manifests: optional `manifest.json` / `manifest.yaml` sidecars.
//!
//! A manifest carries curation metadata for an archive: its display name
//! and description, an icon, a sort order, and an explicit list of
//! sub-sources with their own overrides.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use longecho_common_fs::FsError;

/// Manifest file names, in lookup priority order.
pub const MANIFEST_NAMES: &[&str] = &["manifest.json", "manifest.yaml", "manifest.yml"];

/// The only manifest version understood.
pub const MANIFEST_VERSION: &str = "1.0";

/// Manifest errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(transparent)]
    Io(#[from] FsError),

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported manifest format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid manifest at {}: {}", path.display(), errors.join("; "))]
    Invalid { path: PathBuf, errors: Vec<String> },

    #[error("failed to serialize manifest: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, ManifestError>;

/// What kind of data an archive holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveType {
    Database,
    Documents,
    Site,
    Mixed,
}

impl ArchiveType {
    pub const ALL: [&'static str; 4] = ["database", "documents", "site", "mixed"];
}

/// A curated sub-source entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path relative to the archive root.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browsable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl SourceConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

fn default_browsable() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// A parsed, validated manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub archive_type: Option<ArchiveType>,
    #[serde(default = "default_browsable", skip_serializing_if = "is_true")]
    pub browsable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceConfig>,

    /// File the manifest was loaded from.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl Manifest {
    /// A manifest with only the required fields.
    pub fn minimal(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            name: name.into(),
            description: description.into(),
            archive_type: None,
            browsable: true,
            site: None,
            docs: None,
            icon: None,
            order: None,
            sources: Vec::new(),
            path: None,
        }
    }
}

/// On-disk manifest encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManifestFormat {
    #[default]
    Json,
    Yaml,
}

impl ManifestFormat {
    /// File name written by [`save_manifest`].
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => "manifest.json",
            Self::Yaml => "manifest.yaml",
        }
    }

    /// Format implied by a file's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = longecho_common_fs::dotted_extension(path).unwrap_or_default();
        match ext.as_str() {
            ".json" => Ok(Self::Json),
            ".yaml" | ".yml" => Ok(Self::Yaml),
            _ => Err(ManifestError::UnsupportedFormat(ext)),
        }
    }
}

impl FromStr for ManifestFormat {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(ManifestError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        })
    }
}

/// First manifest file present in `dir`, in priority order.
pub fn find_manifest(dir: impl AsRef<Path>) -> Option<PathBuf> {
    let dir = dir.as_ref();
    MANIFEST_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Read a manifest file into an untyped value, choosing the parser by extension.
pub fn load_manifest_data(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let format = ManifestFormat::from_path(path)?;
    let content = longecho_common_fs::read_text(path)?;

    match format {
        ManifestFormat::Json => serde_json::from_str(&content).map_err(|source| ManifestError::Json {
            path: path.to_path_buf(),
            source,
        }),
        ManifestFormat::Yaml => serde_yaml::from_str(&content).map_err(|source| ManifestError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Validate untyped manifest data, returning every problem found.
pub fn validate_manifest_data(data: &Value) -> Vec<String> {
    let Some(obj) = data.as_object() else {
        return vec!["Manifest must be an object".to_string()];
    };

    let mut errors = Vec::new();

    match obj.get("version") {
        None => errors.push("Missing required field: version".to_string()),
        Some(version) if version.as_str() != Some(MANIFEST_VERSION) => {
            errors.push(format!("Unsupported version: {}", display_value(version)));
        }
        Some(_) => {}
    }

    for field in ["name", "description"] {
        if !obj.contains_key(field) {
            errors.push(format!("Missing required field: {field}"));
        }
    }

    if let Some(kind) = obj.get("type") {
        let known = kind
            .as_str()
            .map(|k| ArchiveType::ALL.contains(&k))
            .unwrap_or(false);
        if !known {
            errors.push(format!("Invalid type: {}", display_value(kind)));
        }
    }

    if let Some(sources) = obj.get("sources") {
        match sources.as_array() {
            None => errors.push("sources must be an array".to_string()),
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    match item.as_object() {
                        None => errors.push(format!("sources[{i}] must be an object")),
                        Some(entry) if !entry.contains_key("path") => {
                            errors.push(format!("sources[{i}] missing required field: path"));
                        }
                        Some(_) => {}
                    }
                }
            }
        }
    }

    errors
}

/// Load and validate the manifest in `dir`.
///
/// A directory without a manifest yields `Ok(None)`. A manifest that is
/// present but unreadable or invalid is an error.
#[instrument(level = "debug", skip_all, fields(dir = %dir.as_ref().display()))]
pub fn load_manifest(dir: impl AsRef<Path>) -> Result<Option<Manifest>> {
    let Some(path) = find_manifest(dir.as_ref()) else {
        debug!("no manifest");
        return Ok(None);
    };

    let data = load_manifest_data(&path)?;
    let errors = validate_manifest_data(&data);
    if !errors.is_empty() {
        return Err(ManifestError::Invalid { path, errors });
    }

    let mut manifest: Manifest = serde_json::from_value(data).map_err(|e| ManifestError::Invalid {
        path: path.clone(),
        errors: vec![e.to_string()],
    })?;
    manifest.path = Some(path);
    Ok(Some(manifest))
}

/// Write `manifest` into `dir`, returning the file written.
pub fn save_manifest(
    manifest: &Manifest,
    dir: impl AsRef<Path>,
    format: ManifestFormat,
) -> Result<PathBuf> {
    let path = dir.as_ref().join(format.file_name());

    let content = match format {
        ManifestFormat::Json => serde_json::to_string_pretty(manifest)
            .map(|json| json + "\n")
            .map_err(|e| ManifestError::Serialize(e.to_string()))?,
        ManifestFormat::Yaml => {
            serde_yaml::to_string(manifest).map_err(|e| ManifestError::Serialize(e.to_string()))?
        }
    };

    longecho_common_fs::write_string_atomic(&path, &content)?;
    Ok(path)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
