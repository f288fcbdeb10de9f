//! The compliance evaluator.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::formats::{detect_formats_with, durable_subset};
use crate::policy::{CompliancePolicy, SITE_DIR, SITE_INDEX};
use crate::readme::parse_readme_with_limit;
use crate::source::{ComplianceResult, ContentEntry, NonComplianceReason, Source};

/// Evaluates directories against a [`CompliancePolicy`].
#[derive(Debug, Clone, Copy)]
pub struct ComplianceChecker<'p> {
    policy: &'p CompliancePolicy,
}

impl Default for ComplianceChecker<'static> {
    fn default() -> Self {
        Self::new(CompliancePolicy::builtin())
    }
}

impl<'p> ComplianceChecker<'p> {
    pub fn new(policy: &'p CompliancePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &'p CompliancePolicy {
        self.policy
    }

    /// First README candidate present in `dir`, in priority order.
    pub fn find_readme(&self, dir: &Path) -> Option<PathBuf> {
        self.policy
            .readme_names()
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Check a directory, short-circuiting on the first failing gate.
    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn check(&self, path: impl AsRef<Path>) -> ComplianceResult {
        let path = path.as_ref();

        let canonical = match path.canonicalize() {
            Ok(canonical) => canonical,
            Err(_) => {
                return ComplianceResult::failed(
                    longecho_common_fs::path::absolute(path),
                    NonComplianceReason::PathMissing,
                );
            }
        };

        if !canonical.is_dir() {
            return ComplianceResult::failed(canonical, NonComplianceReason::NotADirectory);
        }

        let Some(readme_path) = self.find_readme(&canonical) else {
            debug!("no README");
            return ComplianceResult::failed(canonical, NonComplianceReason::NoReadme);
        };

        let formats = detect_formats_with(self.policy, &canonical, self.policy.format_scan_depth());
        let durable_formats = durable_subset(self.policy, &formats);
        if durable_formats.is_empty() {
            debug!(?formats, "no durable formats");
            return ComplianceResult::failed(canonical, NonComplianceReason::NoDurableFormats);
        }

        let readme = parse_readme_with_limit(&readme_path, self.policy.summary_max_length());
        let frontmatter = readme.as_ref().and_then(|r| r.frontmatter.clone());

        let name = readme
            .as_ref()
            .and_then(|r| r.frontmatter_str("name").or_else(|| r.title.clone()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| dir_name(&canonical));

        let description = readme
            .as_ref()
            .and_then(|r| {
                r.frontmatter_str("description")
                    .or_else(|| r.summary.clone())
            })
            .unwrap_or_default();

        let contents = frontmatter.as_ref().and_then(ContentEntry::parse_list);

        let site_index = canonical.join(SITE_DIR).join(SITE_INDEX);
        let has_site = site_index.is_file();

        ComplianceResult::compliant(Source {
            site_path: has_site.then(|| canonical.join(SITE_DIR)),
            path: canonical,
            readme_path,
            name,
            description,
            formats,
            durable_formats,
            has_site,
            frontmatter,
            contents,
            icon: None,
            order: 0,
        })
    }
}

/// Locate a README in `dir` using the built-in candidate names.
pub fn find_readme(dir: impl AsRef<Path>) -> Option<PathBuf> {
    ComplianceChecker::default().find_readme(dir.as_ref())
}

/// Check a directory with the built-in policy.
pub fn check_compliance(path: impl AsRef<Path>) -> ComplianceResult {
    ComplianceChecker::default().check(path)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
