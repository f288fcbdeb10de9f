//! Archive summaries: the root source plus its curated and auto-discovered
//! sub-sources, ready for a site renderer.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::checker::ComplianceChecker;
use crate::manifest::{load_manifest, Manifest, ManifestError, SourceConfig};
use crate::policy::{CompliancePolicy, SITE_DIR};
use crate::source::{NonComplianceReason, Source, SourceOverlay};

/// Order given to sub-sources found without curation.
pub const AUTO_DISCOVERED_ORDER: i64 = 100;

/// Order given to curated sub-sources that do not set one.
pub const CURATED_DEFAULT_ORDER: i64 = 0;

/// Archive loading errors.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("not ECHO-compliant: {} ({reason})", path.display())]
    NotCompliant {
        path: PathBuf,
        reason: NonComplianceReason,
    },

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// An archive root with its resolved metadata and children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Archive {
    pub path: PathBuf,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<Manifest>,
    pub root: Source,
    /// Children sorted by display order.
    pub sources: Vec<Source>,
}

impl From<&Manifest> for SourceOverlay {
    fn from(manifest: &Manifest) -> Self {
        Self {
            name: Some(manifest.name.clone()),
            description: Some(manifest.description.clone()),
            icon: manifest.icon.clone(),
            order: None,
        }
    }
}

impl From<&SourceConfig> for SourceOverlay {
    fn from(config: &SourceConfig) -> Self {
        Self {
            name: config.name.clone(),
            description: None,
            icon: config.icon.clone(),
            order: config.order,
        }
    }
}

/// Resolves an archive's sub-sources against a policy.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveLoader<'p> {
    checker: ComplianceChecker<'p>,
}

impl Default for ArchiveLoader<'static> {
    fn default() -> Self {
        Self::new(CompliancePolicy::builtin())
    }
}

impl<'p> ArchiveLoader<'p> {
    pub fn new(policy: &'p CompliancePolicy) -> Self {
        Self {
            checker: ComplianceChecker::new(policy),
        }
    }

    /// Load the archive rooted at `root`.
    #[instrument(level = "debug", skip_all, fields(root = %root.as_ref().display()))]
    pub fn load(&self, root: impl AsRef<Path>) -> Result<Archive, ArchiveError> {
        let result = self.checker.check(root.as_ref());
        let path = result.path.clone();
        let Some(root_source) = result.source else {
            return Err(ArchiveError::NotCompliant {
                path,
                reason: result.reason.unwrap_or(NonComplianceReason::PathMissing),
            });
        };

        let manifest = load_manifest(&path)?;
        let sources = self.sub_sources(&path, manifest.as_ref());

        let resolved = match &manifest {
            Some(manifest) => root_source.clone().overlay(&SourceOverlay::from(manifest)),
            None => root_source.clone(),
        };

        Ok(Archive {
            path,
            name: resolved.name,
            description: resolved.description,
            icon: manifest.as_ref().and_then(|m| m.icon.clone()),
            manifest,
            root: root_source,
            sources,
        })
    }

    /// Curated sub-sources first, then auto-discovered children, stably
    /// sorted by order.
    pub fn sub_sources(&self, root: &Path, manifest: Option<&Manifest>) -> Vec<Source> {
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let mut sources = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        for config in manifest.map(|m| m.sources.as_slice()).unwrap_or_default() {
            let Some(dir) = resolve_within(&root, &config.path) else {
                continue;
            };
            let Some(source) = self.checker.check(&dir).into_source() else {
                debug!(path = %dir.display(), "curated source is not compliant");
                continue;
            };

            // Cascade: source config over sub-manifest over the source itself.
            let source = match sub_manifest(&dir) {
                Some(sub) => source
                    .with_name(Some(sub.name.as_str()))
                    .with_icon(sub.icon.as_deref())
                    .with_description(Some(sub.description.as_str())),
                None => source,
            };
            let source = source
                .overlay(&SourceOverlay::from(config))
                .with_order(config.order.unwrap_or(CURATED_DEFAULT_ORDER));

            seen.insert(dir);
            sources.push(source);
        }

        for dir in self.child_directories(&root) {
            if seen.contains(&dir) {
                continue;
            }
            let Some(source) = self.checker.check(&dir).into_source() else {
                continue;
            };
            let source = match sub_manifest(&dir) {
                Some(sub) => source.overlay(&SourceOverlay::from(&sub)),
                None => source,
            };
            sources.push(source.with_order(AUTO_DISCOVERED_ORDER));
        }

        sources.sort_by_key(|s| s.order);
        sources
    }

    /// Immediate subdirectories eligible for auto-discovery, canonical and sorted.
    fn child_directories(&self, root: &Path) -> Vec<PathBuf> {
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(error = %e, "cannot list archive root");
                return Vec::new();
            }
        };

        let policy = self.checker.policy();
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                name != SITE_DIR && !policy.should_skip_directory(&name)
            })
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        dirs.into_iter()
            .filter_map(|dir| dir.canonicalize().ok())
            .collect()
    }
}

/// Resolve a manifest-declared path, rejecting anything outside `root`.
fn resolve_within(root: &Path, declared: &str) -> Option<PathBuf> {
    let candidate = root.join(declared);
    let resolved = match candidate.canonicalize() {
        Ok(resolved) => resolved,
        Err(_) => {
            if !longecho_common_fs::path::is_within(&candidate, root) {
                warn!(path = declared, "manifest source escapes archive root");
            } else {
                debug!(path = declared, "manifest source does not exist");
            }
            return None;
        }
    };

    if !longecho_common_fs::path::is_within(&resolved, root) {
        warn!(path = declared, "manifest source escapes archive root");
        return None;
    }
    if resolved == root {
        warn!(path = declared, "manifest source is the archive root itself");
        return None;
    }
    if !resolved.is_dir() {
        debug!(path = declared, "manifest source is not a directory");
        return None;
    }
    Some(resolved)
}

/// A sub-source's own manifest; load failures are logged and ignored.
fn sub_manifest(dir: &Path) -> Option<Manifest> {
    match load_manifest(dir) {
        Ok(manifest) => manifest,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "ignoring unusable sub-manifest");
            None
        }
    }
}

/// Load an archive with the built-in policy.
pub fn load_archive(root: impl AsRef<Path>) -> Result<Archive, ArchiveError> {
    ArchiveLoader::default().load(root)
}

/// Resolve sub-sources with the built-in policy.
pub fn discover_sub_sources(root: impl AsRef<Path>, manifest: Option<&Manifest>) -> Vec<Source> {
    ArchiveLoader::default().sub_sources(root.as_ref(), manifest)
}
