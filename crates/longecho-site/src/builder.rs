//! Renders an archive into a browsable static site.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use longecho_common_fs::path::{absolute, to_unix_string};
use longecho_common_fs::{dotted_extension, ensure_dir, read_text, write_string_atomic};
use longecho_core::policy::SITE_DIR;
use longecho_core::{split_frontmatter, Archive, ArchiveLoader, CompliancePolicy, Source};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::error::{Result, SiteError};
use crate::html::{icon_emoji, markdown_to_html, preformatted};
use crate::templates::{SiteTemplates, INDEX_TEMPLATE, SOURCE_TEMPLATE};

const PAGE_FILE: &str = "index.html";

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
    pub name: String,
    pub output_path: PathBuf,
    pub sources_count: usize,
    pub pages: Vec<PageSummary>,
}

/// One rendered source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub name: String,
    pub source: PathBuf,
    pub page: PathBuf,
    /// Whether the source's own site was copied next to its page.
    pub bundled: bool,
}

#[derive(Serialize)]
struct IndexPage<'a> {
    name: &'a str,
    description: &'a str,
    icon: String,
    sources: Vec<SourceCard<'a>>,
    generated_at: String,
}

#[derive(Serialize)]
struct SourceCard<'a> {
    name: &'a str,
    description: &'a str,
    url: String,
    icon: String,
    durable_formats: &'a BTreeSet<String>,
}

#[derive(Serialize)]
struct SourcePage<'a> {
    name: &'a str,
    description: &'a str,
    parent_name: &'a str,
    icon: String,
    path: String,
    durable_formats: &'a BTreeSet<String>,
    readme_html: String,
    site_url: Option<String>,
}

/// Builds `index.html` for an archive plus one page per sub-source.
///
/// Output goes to `<archive>/site` unless [`SiteBuilder::output`] says
/// otherwise. With [`SiteBuilder::bundle`], sources that ship their own
/// `site/` have it copied beside their page so the result is self-contained.
#[derive(Debug, Clone)]
pub struct SiteBuilder<'p> {
    loader: ArchiveLoader<'p>,
    output: Option<PathBuf>,
    bundle: bool,
}

impl<'p> SiteBuilder<'p> {
    pub fn new(policy: &'p CompliancePolicy) -> Self {
        Self {
            loader: ArchiveLoader::new(policy),
            output: None,
            bundle: false,
        }
    }

    pub fn output(mut self, dir: Option<PathBuf>) -> Self {
        self.output = dir;
        self
    }

    pub fn bundle(mut self, bundle: bool) -> Self {
        self.bundle = bundle;
        self
    }

    #[instrument(level = "debug", skip_all, fields(root = %root.as_ref().display()))]
    pub fn build(&self, root: impl AsRef<Path>) -> Result<BuildSummary> {
        let archive = self.loader.load(root)?;
        let output_path = match &self.output {
            Some(dir) => absolute(dir),
            None => archive.path.join(SITE_DIR),
        };
        ensure_dir(&output_path)?;

        let templates = SiteTemplates::new()?;
        let slugs = page_slugs(&archive.sources);

        let mut pages = Vec::with_capacity(archive.sources.len());
        for (source, slug) in archive.sources.iter().zip(&slugs) {
            let page_dir = output_path.join(slug);
            let page = self.build_source_page(&templates, &archive, source, &page_dir)?;
            pages.push(page);
        }

        let index = IndexPage {
            name: &archive.name,
            description: &archive.description,
            icon: icon_emoji(archive.icon.as_deref()),
            sources: archive
                .sources
                .iter()
                .zip(&slugs)
                .map(|(source, slug)| SourceCard {
                    name: &source.name,
                    description: &source.description,
                    url: to_unix_string(Path::new(slug).join(PAGE_FILE)),
                    icon: icon_emoji(source.icon.as_deref()),
                    durable_formats: &source.durable_formats,
                })
                .collect(),
            generated_at: Local::now().format("%Y-%m-%d %H:%M").to_string(),
        };
        let html = templates.render(INDEX_TEMPLATE, &index)?;
        write_string_atomic(output_path.join(PAGE_FILE), &html)?;

        info!(
            output = %output_path.display(),
            sources = pages.len(),
            "site built"
        );
        Ok(BuildSummary {
            name: archive.name,
            output_path,
            sources_count: pages.len(),
            pages,
        })
    }

    fn build_source_page(
        &self,
        templates: &SiteTemplates,
        archive: &Archive,
        source: &Source,
        page_dir: &Path,
    ) -> Result<PageSummary> {
        ensure_dir(page_dir)?;

        let mut bundled = false;
        let site_url = match &source.site_path {
            Some(site) if source.has_site && self.bundle => {
                let copied = copy_tree(site, &page_dir.join(SITE_DIR))?;
                debug!(source = %source.path.display(), files = copied, "bundled source site");
                bundled = true;
                Some(to_unix_string(Path::new(SITE_DIR).join(PAGE_FILE)))
            }
            Some(site) if source.has_site => Some(site.join(PAGE_FILE).display().to_string()),
            _ => None,
        };

        let page = SourcePage {
            name: &source.name,
            description: &source.description,
            parent_name: &archive.name,
            icon: icon_emoji(source.icon.as_deref()),
            path: relative_display(&source.path, &archive.path),
            durable_formats: &source.durable_formats,
            readme_html: readme_html(source),
            site_url,
        };
        let html = templates.render(SOURCE_TEMPLATE, &page)?;
        let page_path = page_dir.join(PAGE_FILE);
        write_string_atomic(&page_path, &html)?;

        Ok(PageSummary {
            name: source.name.clone(),
            source: source.path.clone(),
            page: page_path,
            bundled,
        })
    }
}

/// Build a site with the built-in policy.
pub fn build_site(
    root: impl AsRef<Path>,
    output: Option<PathBuf>,
    bundle: bool,
) -> Result<BuildSummary> {
    SiteBuilder::new(CompliancePolicy::builtin())
        .output(output)
        .bundle(bundle)
        .build(root)
}

/// One output directory per source, named after the source directory.
/// Repeated names get a numeric suffix.
fn page_slugs(sources: &[Source]) -> Vec<String> {
    let mut used = HashSet::new();
    sources
        .iter()
        .map(|source| {
            let base = source
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "source".to_string());
            let mut slug = base.clone();
            let mut n = 2;
            while !used.insert(slug.clone()) {
                slug = format!("{base}-{n}");
                n += 1;
            }
            slug
        })
        .collect()
}

fn relative_display(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => to_unix_string(rel),
        Err(_) => path.display().to_string(),
    }
}

/// README body as HTML. Markdown front matter is not shown.
fn readme_html(source: &Source) -> String {
    let text = match read_text(&source.readme_path) {
        Ok(text) => text,
        Err(e) => {
            warn!(path = %source.readme_path.display(), error = %e, "cannot read README");
            return String::new();
        }
    };
    if dotted_extension(&source.readme_path).as_deref() == Some(".md") {
        let (_, body) = split_frontmatter(&text);
        markdown_to_html(&body)
    } else {
        preformatted(&text)
    }
}

/// Copy regular files under `from` into `to`. Symlinks are not followed.
fn copy_tree(from: &Path, to: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(from).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(from).to_path_buf();
                return Err(SiteError::Copy {
                    path,
                    source: e.into(),
                });
            }
        };
        let rel = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let target = to.join(rel);
        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target).map_err(|source| SiteError::Copy {
                path: entry.path().to_path_buf(),
                source,
            })?;
            copied += 1;
        }
    }
    Ok(copied)
}
