//! Text cleanup applied to every user-supplied field at the boundary.
//!
//! Trims whitespace and strips anything tag-shaped. This is not an HTML
//! sanitizer; stored text is plain and rendered as plain text by clients,
//! so removing `<...>` runs is sufficient.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[^>]+(>|$)").expect("valid tag regex"));

/// Trim a value and strip HTML-like tags from it.
pub fn clean_text(value: &str) -> String {
    let trimmed = value.trim();
    TAG_RE.replace_all(trimmed, "").trim().to_string()
}

/// Clean an optional field, mapping empty results to `None`.
pub fn clean_opt(value: Option<&str>) -> Option<String> {
    let cleaned = clean_text(value?);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(clean_text("  hello  "), "hello");
    }

    #[test]
    fn test_strips_simple_tags() {
        assert_eq!(clean_text("<b>bold</b> move"), "bold move");
    }

    #[test]
    fn test_strips_unclosed_tag_at_end() {
        assert_eq!(clean_text("hi <script"), "hi");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(clean_text("just words, no markup"), "just words, no markup");
    }

    #[test]
    fn test_empty_after_stripping() {
        assert_eq!(clean_text("<div></div>"), "");
    }

    #[test]
    fn test_clean_opt_none_for_empty() {
        assert_eq!(clean_opt(Some("   ")), None);
        assert_eq!(clean_opt(Some("<br>")), None);
        assert_eq!(clean_opt(None), None);
    }

    #[test]
    fn test_clean_opt_some() {
        assert_eq!(clean_opt(Some(" hi ")), Some("hi".to_string()));
    }
}
