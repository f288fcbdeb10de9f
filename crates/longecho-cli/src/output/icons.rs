//! Status glyphs with ASCII fallbacks.

use std::env;

/// A status glyph in its unicode and ASCII renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub unicode: &'static str,
    pub ascii: &'static str,
}

pub const CHECK: Glyph = Glyph { unicode: "✓", ascii: "[ok]" };
pub const CROSS: Glyph = Glyph { unicode: "✗", ascii: "[x]" };
pub const BULLET: Glyph = Glyph { unicode: "•", ascii: "*" };

/// Picks unicode or ASCII glyphs for the current terminal.
#[derive(Debug, Clone, Copy)]
pub struct IconContext {
    unicode: bool,
}

impl IconContext {
    pub fn new() -> Self {
        Self {
            unicode: detect_unicode_support(),
        }
    }

    fn render(&self, glyph: Glyph) -> &'static str {
        if self.unicode {
            glyph.unicode
        } else {
            glyph.ascii
        }
    }

    pub fn check(&self) -> &'static str {
        self.render(CHECK)
    }

    pub fn cross(&self) -> &'static str {
        self.render(CROSS)
    }

    pub fn bullet(&self) -> &'static str {
        self.render(BULLET)
    }
}

impl Default for IconContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Linux virtual consoles and dumb terminals get ASCII, as does any locale
/// that is set without a UTF-8 codeset. `LC_ALL` overrides `LC_CTYPE`, which
/// overrides `LANG`.
fn detect_unicode_support() -> bool {
    let term_ok = env::var("TERM")
        .map(|t| !(t.contains("linux") || t == "dumb"))
        .unwrap_or(true);

    let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.is_empty());
    let locale_ok = locale
        .map(|l| l.to_uppercase().contains("UTF"))
        .unwrap_or(true);

    term_ok && locale_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_fallback() {
        let icons = IconContext { unicode: false };
        assert_eq!(icons.check(), "[ok]");
        assert_eq!(icons.cross(), "[x]");
        assert_eq!(icons.bullet(), "*");
    }

    #[test]
    fn test_unicode_glyphs() {
        let icons = IconContext { unicode: true };
        assert_eq!(icons.check(), "✓");
        assert_eq!(icons.cross(), "✗");
        assert_eq!(icons.bullet(), "•");
    }
}
