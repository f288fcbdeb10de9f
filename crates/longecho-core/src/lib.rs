//! longecho core: ECHO compliance checking, source discovery and manifests.
//!
//! A directory is ECHO-compliant when it has a README and holds data in at
//! least one durable format. [`check_compliance`] judges a single directory,
//! [`discover_sources`] walks a tree lazily, and [`load_archive`] resolves an
//! archive root together with its curated sub-sources.

pub mod archive;
pub mod checker;
pub mod discovery;
pub mod formats;
pub mod manifest;
pub mod policy;
pub mod readme;
pub mod source;

pub use archive::{discover_sub_sources, load_archive, Archive, ArchiveError, ArchiveLoader};
pub use checker::{check_compliance, find_readme, ComplianceChecker};
pub use discovery::{
    discover_sources, get_source_info, search_sources, DiscoverSources, Discovery, SearchSources,
};
pub use formats::{detect_formats, detect_formats_with, is_durable_format};
pub use manifest::{
    find_manifest, load_manifest, load_manifest_data, save_manifest, validate_manifest_data,
    ArchiveType, Manifest, ManifestError, ManifestFormat, SourceConfig,
};
pub use policy::CompliancePolicy;
pub use readme::{parse_readme, split_frontmatter, Frontmatter, Readme};
pub use source::{
    truncate, ComplianceResult, ContentEntry, NonComplianceReason, Source, SourceOverlay,
};
