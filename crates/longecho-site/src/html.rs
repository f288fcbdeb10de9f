//! HTML helpers: escaping, README rendering and source icons.

use pulldown_cmark::{html, Options, Parser};

/// Icon shown for sources that name no known icon.
pub const DEFAULT_ICON: &str = "📁";

/// Named icons a manifest or front matter may use instead of an emoji.
pub const ICON_NAMES: &[(&str, &str)] = &[
    ("archive", "🗃️"),
    ("book", "📚"),
    ("bookmark", "🔖"),
    ("calendar", "📅"),
    ("chat", "💬"),
    ("code", "💻"),
    ("database", "🗄️"),
    ("document", "📄"),
    ("mail", "✉️"),
    ("music", "🎵"),
    ("photo", "📷"),
    ("video", "🎬"),
];

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render markdown with tables and fenced code blocks.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES);
    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, parser);
    html_output
}

/// Plain-text READMEs keep their line breaks.
pub fn preformatted(text: &str) -> String {
    format!("<pre>{}</pre>\n", escape_html(text))
}

/// Resolve an icon name to its emoji.
///
/// Known names map through [`ICON_NAMES`]. Any other non-ASCII value is
/// taken to be an emoji already; everything else gets [`DEFAULT_ICON`].
pub fn icon_emoji(icon: Option<&str>) -> String {
    let Some(icon) = icon.map(str::trim).filter(|i| !i.is_empty()) else {
        return DEFAULT_ICON.to_string();
    };
    let key = icon.to_lowercase();
    if let Some((_, emoji)) = ICON_NAMES.iter().find(|(name, _)| *name == key) {
        return (*emoji).to_string();
    }
    if icon.is_ascii() {
        DEFAULT_ICON.to_string()
    } else {
        icon.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("A & B"), "A &amp; B");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_markdown_headings_and_paragraphs() {
        let html = markdown_to_html("# Title\n\n## Section\n\nSome text.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<h2>Section</h2>"));
        assert!(html.contains("<p>Some text.</p>"));
    }

    #[test]
    fn test_markdown_fenced_code_and_tables() {
        let html = markdown_to_html("```\nlet x = 1;\n```\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<pre><code>"));
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_preformatted_escapes() {
        assert_eq!(preformatted("a < b\n"), "<pre>a &lt; b\n</pre>\n");
    }

    #[test]
    fn test_icon_emoji() {
        assert_eq!(icon_emoji(Some("chat")), "💬");
        assert_eq!(icon_emoji(Some("Bookmark")), "🔖");
        assert_eq!(icon_emoji(Some("database")), "🗄️");
        assert_eq!(icon_emoji(Some("📚")), "📚");
        assert_eq!(icon_emoji(Some("unknown")), DEFAULT_ICON);
        assert_eq!(icon_emoji(Some("  ")), DEFAULT_ICON);
        assert_eq!(icon_emoji(None), DEFAULT_ICON);
    }
}
