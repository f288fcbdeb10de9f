//! Recursive source discovery and search.
//!
//! Discovery is a lazy pre-order walk: a directory's own source is yielded
//! before anything beneath it, and siblings are visited in name order.
//! Callers control how much of the tree is walked by how much of the
//! iterator they consume.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::checker::ComplianceChecker;
use crate::policy::CompliancePolicy;
use crate::source::Source;

type Entries<'p> = Box<dyn Iterator<Item = walkdir::Result<DirEntry>> + 'p>;

/// Discovery configuration for one root.
///
/// Each call to [`Discovery::iter`] starts a fresh walk.
#[derive(Debug, Clone)]
pub struct Discovery<'p> {
    root: PathBuf,
    max_depth: Option<usize>,
    follow_symlinks: bool,
    checker: ComplianceChecker<'p>,
}

impl Discovery<'static> {
    /// Discovery under `root` with the built-in policy.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_policy(root, CompliancePolicy::builtin())
    }
}

impl<'p> Discovery<'p> {
    pub fn with_policy(root: impl Into<PathBuf>, policy: &'p CompliancePolicy) -> Self {
        Self {
            root: root.into(),
            max_depth: None,
            follow_symlinks: false,
            checker: ComplianceChecker::new(policy),
        }
    }

    /// Do not descend below `depth` levels (the root is depth 0).
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Start a walk. An unusable root produces an empty iterator.
    pub fn iter(&self) -> DiscoverSources<'p> {
        let entries = match self.root.canonicalize() {
            Ok(root) if root.is_dir() => Some(self.entries(root)),
            _ => {
                debug!(root = %self.root.display(), "discovery root is not a directory");
                None
            }
        };

        DiscoverSources {
            entries,
            checker: self.checker,
        }
    }

    fn entries(&self, root: PathBuf) -> Entries<'p> {
        let policy = self.checker.policy();
        let mut walker = WalkDir::new(root)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        // Without follow_links a symlinked directory reports as a symlink,
        // so the is_dir test also prunes it.
        Box::new(walker.into_iter().filter_entry(move |entry| {
            entry.depth() == 0
                || (entry.file_type().is_dir()
                    && !policy.should_skip_directory(&entry.file_name().to_string_lossy()))
        }))
    }
}

impl<'a, 'p> IntoIterator for &'a Discovery<'p> {
    type Item = Source;
    type IntoIter = DiscoverSources<'p>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over compliant sources beneath a root.
pub struct DiscoverSources<'p> {
    entries: Option<Entries<'p>>,
    checker: ComplianceChecker<'p>,
}

impl Iterator for DiscoverSources<'_> {
    type Item = Source;

    fn next(&mut self) -> Option<Source> {
        let entries = self.entries.as_mut()?;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable directory");
                    continue;
                }
            };

            if self.checker.find_readme(entry.path()).is_none() {
                continue;
            }

            let result = self.checker.check(entry.path());
            match result.into_source() {
                Some(source) => return Some(source),
                None => debug!(path = %entry.path().display(), "README present but not compliant"),
            }
        }

        self.entries = None;
        None
    }
}

/// Sources under `root` whose description or README mention `query`.
pub struct SearchSources<'p> {
    inner: DiscoverSources<'p>,
    query: String,
}

impl<'p> SearchSources<'p> {
    pub fn new(inner: DiscoverSources<'p>, query: &str) -> Self {
        Self {
            inner,
            query: query.to_lowercase(),
        }
    }

    fn matches(&self, source: &Source) -> bool {
        if source.description.to_lowercase().contains(&self.query) {
            return true;
        }
        match longecho_common_fs::read_text(&source.readme_path) {
            Ok(content) => content.to_lowercase().contains(&self.query),
            Err(e) => {
                debug!(error = %e, "README unreadable during search");
                false
            }
        }
    }
}

impl Iterator for SearchSources<'_> {
    type Item = Source;

    fn next(&mut self) -> Option<Source> {
        loop {
            let source = self.inner.next()?;
            if self.matches(&source) {
                return Some(source);
            }
        }
    }
}

/// Discover compliant sources with the built-in policy.
pub fn discover_sources(
    root: impl AsRef<Path>,
    max_depth: Option<usize>,
    follow_symlinks: bool,
) -> DiscoverSources<'static> {
    Discovery::new(root.as_ref())
        .max_depth(max_depth)
        .follow_symlinks(follow_symlinks)
        .iter()
}

/// Case-insensitive search over discovered sources.
pub fn search_sources(
    root: impl AsRef<Path>,
    query: &str,
    max_depth: Option<usize>,
) -> SearchSources<'static> {
    SearchSources::new(discover_sources(root, max_depth, false), query)
}

/// Check a single directory, returning its source when compliant.
pub fn get_source_info(path: impl AsRef<Path>) -> Option<Source> {
    ComplianceChecker::default().check(path).into_source()
}
