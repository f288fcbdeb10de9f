//! Compliance results and the `Source` record handed to renderers and the CLI.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Serialize, Serializer};
use serde_yaml::Value;

use crate::readme::{scalar_string, Frontmatter};

/// Width of the description shown by `Source`'s `Display` impl.
const DISPLAY_DESCRIPTION_WIDTH: usize = 60;

/// A curated child entry declared in front matter `contents`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentEntry {
    /// Path relative to the source.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ContentEntry {
    /// Parse the front matter `contents` list.
    ///
    /// Only mapping elements with a string `path` are kept, in order.
    /// Returns `None` when nothing usable remains.
    pub fn parse_list(frontmatter: &Frontmatter) -> Option<Vec<ContentEntry>> {
        let items = frontmatter.get("contents")?.as_sequence()?;

        let entries: Vec<ContentEntry> = items
            .iter()
            .filter_map(Value::as_mapping)
            .filter_map(|item| {
                let path = item.get("path").and_then(scalar_string)?;
                let description = item.get("description").and_then(scalar_string);
                Some(ContentEntry { path, description })
            })
            .collect();

        if entries.is_empty() {
            None
        } else {
            Some(entries)
        }
    }
}

/// A directory judged compliant, with its resolved display metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Source {
    /// Canonical directory path.
    pub path: PathBuf,
    pub readme_path: PathBuf,
    pub name: String,
    pub description: String,
    /// Every extension seen by the format scan.
    pub formats: BTreeSet<String>,
    /// The durable subset of `formats`.
    pub durable_formats: BTreeSet<String>,
    pub has_site: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<Frontmatter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<ContentEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Display priority; lower sorts first.
    pub order: i64,
}

impl Source {
    /// Replace the name if `name` is present and non-empty.
    pub fn with_name(mut self, name: Option<&str>) -> Self {
        if let Some(name) = non_empty(name) {
            self.name = name.to_string();
        }
        self
    }

    /// Replace the description if `description` is present and non-empty.
    pub fn with_description(mut self, description: Option<&str>) -> Self {
        if let Some(description) = non_empty(description) {
            self.description = description.to_string();
        }
        self
    }

    /// Replace the icon if `icon` is present and non-empty.
    pub fn with_icon(mut self, icon: Option<&str>) -> Self {
        if let Some(icon) = non_empty(icon) {
            self.icon = Some(icon.to_string());
        }
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Apply every present field of an overlay.
    pub fn overlay(self, overlay: &SourceOverlay) -> Self {
        let source = self
            .with_name(overlay.name.as_deref())
            .with_description(overlay.description.as_deref())
            .with_icon(overlay.icon.as_deref());
        match overlay.order {
            Some(order) => source.with_order(order),
            None => source,
        }
    }

    /// Formats seen that are not durable.
    pub fn other_formats(&self) -> impl Iterator<Item = &str> {
        self.formats
            .difference(&self.durable_formats)
            .map(String::as_str)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = if self.description.is_empty() {
            "No description"
        } else {
            self.description.as_str()
        };
        write!(
            f,
            "{}: {}",
            self.path.display(),
            truncate(description, DISPLAY_DESCRIPTION_WIDTH)
        )
    }
}

/// Optional metadata substituted onto a [`Source`].
///
/// Absent or empty fields leave the source untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceOverlay {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub order: Option<i64>,
}

/// Why a directory failed the compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonComplianceReason {
    PathMissing,
    NotADirectory,
    NoReadme,
    NoDurableFormats,
}

impl NonComplianceReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PathMissing => "Path does not exist",
            Self::NotADirectory => "Path is not a directory",
            Self::NoReadme => "No README.md or README.txt found",
            Self::NoDurableFormats => "No durable data formats found",
        }
    }
}

impl fmt::Display for NonComplianceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NonComplianceReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Outcome of a compliance check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceResult {
    pub compliant: bool,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<NonComplianceReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl ComplianceResult {
    pub fn compliant(source: Source) -> Self {
        Self {
            compliant: true,
            path: source.path.clone(),
            reason: None,
            source: Some(source),
        }
    }

    pub fn failed(path: PathBuf, reason: NonComplianceReason) -> Self {
        Self {
            compliant: false,
            path,
            reason: Some(reason),
            source: None,
        }
    }

    /// Consume the result, keeping only a compliant source.
    pub fn into_source(self) -> Option<Source> {
        self.source
    }
}

impl fmt::Display for ComplianceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            None => write!(f, "ECHO-compliant: {}", self.path.display()),
            Some(reason) => write!(
                f,
                "Not ECHO-compliant: {} ({})",
                self.path.display(),
                reason
            ),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Truncate to `width` characters, ending in `...` when shortened.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}
