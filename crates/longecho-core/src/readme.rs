//! README parsing: YAML front matter, title and summary extraction.

use std::path::Path;

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::policy::MAX_README_SUMMARY_LENGTH;

/// Front matter: an ordered map of arbitrary YAML values.
pub type Frontmatter = Mapping;

/// Line that opens and closes a front matter block.
pub const FRONTMATTER_DELIMITER: &str = "---";

/// A README split into its constituent parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readme {
    /// Parsed front matter, if a well-formed mapping block was present.
    pub frontmatter: Option<Frontmatter>,
    /// Text after the front matter block.
    pub body: String,
    /// Text of the first `# ` heading.
    pub title: Option<String>,
    /// First paragraph, space-joined and truncated.
    pub summary: Option<String>,
}

impl Readme {
    /// Parse README text using the default summary length.
    pub fn parse(content: &str) -> Self {
        Self::parse_with_limit(content, MAX_README_SUMMARY_LENGTH)
    }

    /// Parse README text, truncating the summary to `max_summary_chars`.
    pub fn parse_with_limit(content: &str, max_summary_chars: usize) -> Self {
        let (frontmatter, body) = split_frontmatter(content);
        let (title, summary) = scan_body(&body, max_summary_chars);

        Self {
            frontmatter,
            body,
            title,
            summary,
        }
    }

    /// Look up a non-empty scalar field in the front matter, as text.
    pub fn frontmatter_str(&self, key: &str) -> Option<String> {
        frontmatter_str(self.frontmatter.as_ref()?, key)
    }
}

/// Look up a scalar value by key and render it as text.
///
/// Numbers and booleans are stringified (`name: 2024` gives `"2024"`).
/// Null, sequences, mappings and empty strings yield `None`.
pub fn frontmatter_str(frontmatter: &Frontmatter, key: &str) -> Option<String> {
    frontmatter
        .get(key)
        .and_then(scalar_string)
        .filter(|s| !s.is_empty())
}

/// Text form of a YAML scalar.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Split YAML front matter from markdown content.
///
/// Front matter must start at the very first character with a `---` line.
/// The block ends at the next line that is `---` after trimming.
///
/// * no opening delimiter: `(None, content)`
/// * opening but never closed: `(None, content)` unchanged
/// * closed but not a YAML mapping: `(None, text after the closing line)`
pub fn split_frontmatter(content: &str) -> (Option<Frontmatter>, String) {
    if !content.starts_with(FRONTMATTER_DELIMITER) {
        return (None, content.to_string());
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let Some(close) = lines
        .iter()
        .skip(1)
        .position(|line| line.trim() == FRONTMATTER_DELIMITER)
        .map(|i| i + 1)
    else {
        return (None, content.to_string());
    };

    let yaml = lines[1..close].join("\n");
    let body = lines[close + 1..].join("\n");

    match serde_yaml::from_str::<Value>(&yaml) {
        Ok(Value::Mapping(map)) => (Some(map), body),
        Ok(_) => (None, body),
        Err(e) => {
            debug!(error = %e, "ignoring malformed front matter");
            (None, body)
        }
    }
}

/// Read and parse a README, using the default summary length.
///
/// Returns `None` when the file cannot be read or is not valid UTF-8.
pub fn parse_readme(path: impl AsRef<Path>) -> Option<Readme> {
    parse_readme_with_limit(path, MAX_README_SUMMARY_LENGTH)
}

/// Read and parse a README with an explicit summary length.
pub fn parse_readme_with_limit(path: impl AsRef<Path>, max_summary_chars: usize) -> Option<Readme> {
    match longecho_common_fs::read_text(path.as_ref()) {
        Ok(content) => Some(Readme::parse_with_limit(&content, max_summary_chars)),
        Err(e) => {
            debug!(error = %e, "README unreadable");
            None
        }
    }
}

/// Walk the body once, collecting the title and the first paragraph.
fn scan_body(body: &str, max_summary_chars: usize) -> (Option<String>, Option<String>) {
    let mut title: Option<String> = None;
    let mut summary_lines: Vec<&str> = Vec::new();
    let mut in_paragraph = false;

    for line in body.split('\n') {
        let stripped = line.trim();

        if title.is_none() {
            if let Some(heading) = stripped.strip_prefix("# ") {
                title = Some(heading.trim().to_string());
                continue;
            }
        }

        if stripped.starts_with('#') {
            if !summary_lines.is_empty() {
                break;
            }
            continue;
        }

        if stripped.is_empty() {
            if in_paragraph {
                break;
            }
            continue;
        }

        in_paragraph = true;
        summary_lines.push(stripped);
    }

    let summary = if summary_lines.is_empty() {
        None
    } else {
        Some(
            summary_lines
                .join(" ")
                .chars()
                .take(max_summary_chars)
                .collect(),
        )
    };

    (title, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = split_frontmatter("# Title\n\nContent here.");
        assert!(fm.is_none());
        assert_eq!(body, "# Title\n\nContent here.");
    }

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-15\n---\n# Title\n\nContent.";
        let (fm, body) = split_frontmatter(content);
        let fm = fm.unwrap();
        assert_eq!(frontmatter_str(&fm, "title").as_deref(), Some("Hello"));
        assert_eq!(frontmatter_str(&fm, "date").as_deref(), Some("2024-01-15"));
        assert_eq!(body, "# Title\n\nContent.");
    }

    #[test]
    fn test_frontmatter_scalars_as_text() {
        let (fm, _) = split_frontmatter("---\nyear: 2024\ndraft: true\ntags: [a]\nempty: ''\nnothing: ~\n---\n");
        let fm = fm.unwrap();
        assert_eq!(frontmatter_str(&fm, "year").as_deref(), Some("2024"));
        assert_eq!(frontmatter_str(&fm, "draft").as_deref(), Some("true"));
        assert_eq!(frontmatter_str(&fm, "tags"), None);
        assert_eq!(frontmatter_str(&fm, "empty"), None);
        assert_eq!(frontmatter_str(&fm, "nothing"), None);
    }

    #[test]
    fn test_frontmatter_key_order_is_preserved() {
        let content = "---\nzeta: 1\nalpha: 2\nmid: [a, b]\n---\nbody";
        let (fm, _) = split_frontmatter(content);
        let fm = fm.unwrap();
        let keys: Vec<&str> = fm
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, body) = split_frontmatter("---\n---\n# Title");
        assert!(fm.is_none());
        assert_eq!(body, "# Title");
    }

    #[test]
    fn test_non_mapping_frontmatter_strips_block() {
        let (fm, body) = split_frontmatter("---\n- a\n- b\n---\nBody text");
        assert!(fm.is_none());
        assert_eq!(body, "Body text");
    }

    #[test]
    fn test_malformed_frontmatter_strips_block() {
        let (fm, body) = split_frontmatter("---\nkey: [unclosed\n---\nBody text");
        assert!(fm.is_none());
        assert_eq!(body, "Body text");
    }

    #[test]
    fn test_no_closing_delimiter() {
        let content = "---\ntitle: Hello\n# No closing delimiter";
        let (fm, body) = split_frontmatter(content);
        assert!(fm.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_closing_delimiter_tolerates_whitespace() {
        let (fm, body) = split_frontmatter("---\nname: X\n  ---  \r\nrest");
        assert_eq!(frontmatter_str(&fm.unwrap(), "name").as_deref(), Some("X"));
        assert_eq!(body, "rest");
    }

    #[test]
    fn test_frontmatter_must_start_at_beginning() {
        let content = "Some text\n---\ntitle: Hello\n---\nMore text";
        let (fm, body) = split_frontmatter(content);
        assert!(fm.is_none());
        assert_eq!(body, content);

        let indented = " ---\nname: X\n---\n";
        assert_eq!(split_frontmatter(indented), (None, indented.to_string()));
    }

    #[test]
    fn test_simple_readme() {
        let readme = Readme::parse("# My Project\n\nA great project.\n\nMore details.");
        assert_eq!(readme.title.as_deref(), Some("My Project"));
        assert_eq!(readme.summary.as_deref(), Some("A great project."));
    }

    #[test]
    fn test_readme_with_frontmatter() {
        let readme = Readme::parse(
            "---\ntitle: Custom Title\ndescription: Custom desc\n---\n# Heading\n\nFirst paragraph.",
        );
        assert_eq!(readme.frontmatter_str("title").as_deref(), Some("Custom Title"));
        assert_eq!(readme.frontmatter_str("description").as_deref(), Some("Custom desc"));
        assert_eq!(readme.title.as_deref(), Some("Heading"));
        assert_eq!(readme.summary.as_deref(), Some("First paragraph."));
        assert_eq!(readme.body, "# Heading\n\nFirst paragraph.");
    }

    #[test]
    fn test_no_heading() {
        let readme = Readme::parse("Just a paragraph with no heading.");
        assert!(readme.title.is_none());
        assert_eq!(readme.summary.as_deref(), Some("Just a paragraph with no heading."));
    }

    #[test]
    fn test_title_without_summary() {
        let readme = Readme::parse("# Only A Title\n\n## Section\n");
        assert_eq!(readme.title.as_deref(), Some("Only A Title"));
        assert!(readme.summary.is_none());
    }

    #[test]
    fn test_multiline_paragraph() {
        let readme = Readme::parse("# Title\n\nFirst line\n   second line.  \n\nSecond paragraph.");
        assert_eq!(readme.summary.as_deref(), Some("First line second line."));
    }

    #[test]
    fn test_skips_subheadings_before_paragraph() {
        let readme = Readme::parse("# Title\n\n## Section\n\nActual content.");
        assert_eq!(readme.title.as_deref(), Some("Title"));
        assert_eq!(readme.summary.as_deref(), Some("Actual content."));
    }

    #[test]
    fn test_subheading_ends_paragraph() {
        let readme = Readme::parse("Intro line\n## Next\nNot included");
        assert_eq!(readme.summary.as_deref(), Some("Intro line"));
    }

    #[test]
    fn test_only_first_h1_is_title() {
        let readme = Readme::parse("# First\n# Second\nText");
        assert_eq!(readme.title.as_deref(), Some("First"));
        assert_eq!(readme.summary.as_deref(), Some("Text"));
    }

    #[test]
    fn test_title_after_paragraph_is_still_found() {
        let readme = Readme::parse("Summary first\n# Late Title\nmore");
        assert_eq!(readme.title.as_deref(), Some("Late Title"));
        assert_eq!(readme.summary.as_deref(), Some("Summary first more"));
    }

    #[test]
    fn test_summary_truncation() {
        let readme = Readme::parse(&format!("# Title\n\n{}", "x".repeat(600)));
        assert_eq!(readme.summary.unwrap().chars().count(), 500);
    }

    #[test]
    fn test_summary_truncation_counts_characters() {
        let readme = Readme::parse_with_limit(&"é".repeat(20), 10);
        assert_eq!(readme.summary.unwrap(), "é".repeat(10));
    }

    #[test]
    fn test_parse_readme_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "# Disk\n\nOn disk.").unwrap();

        let readme = parse_readme(&path).unwrap();
        assert_eq!(readme.title.as_deref(), Some("Disk"));
        assert_eq!(readme.summary.as_deref(), Some("On disk."));
    }

    #[test]
    fn test_nonexistent_file() {
        let dir = tempdir().unwrap();
        assert!(parse_readme(dir.path().join("NOPE.md")).is_none());
    }

    #[test]
    fn test_invalid_utf8_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, [b'#', b' ', 0xff, 0xfe]).unwrap();
        assert!(parse_readme(&path).is_none());
    }

    proptest! {
        #[test]
        fn prop_no_delimiter_means_unchanged(s in "\\PC*") {
            prop_assume!(!s.starts_with("---"));
            let (fm, body) = split_frontmatter(&s);
            prop_assert!(fm.is_none());
            prop_assert_eq!(body, s);
        }

        #[test]
        fn prop_well_formed_block_yields_exact_body(
            key in "k_[a-z]{0,8}",
            value in "[A-Za-z0-9 ]{0,16}",
            body in "[A-Za-z0-9 #\n]{0,64}",
        ) {
            let content = format!("---\n{key}: \"{value}\"\n---\n{body}");
            let (fm, rest) = split_frontmatter(&content);
            let fm = fm.expect("mapping front matter");
            prop_assert_eq!(fm.get(key.as_str()).and_then(Value::as_str), Some(value.as_str()));
            prop_assert_eq!(rest, body);
        }

        #[test]
        fn prop_unterminated_block_is_whole_body(lines in proptest::collection::vec("[a-z: ]{0,12}", 0..6)) {
            let content = format!("---\n{}", lines.join("\n"));
            prop_assume!(!lines.iter().any(|l| l.trim() == "---"));
            let (fm, body) = split_frontmatter(&content);
            prop_assert!(fm.is_none());
            prop_assert_eq!(body, content);
        }
    }
}
