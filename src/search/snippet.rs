//! Display snippet extraction
//!
//! Prefers the engine-provided highlight fragments for the body field;
//! falls back to a markup-stripped, truncated slice of the body copy.
//! Pure and side-effect-free.

use once_cell::sync::Lazy;
use regex::Regex;

/// Upper bound for the fallback snippet, in characters
pub const SNIPPET_MAX_CHARS: usize = 300;

const FRAGMENT_SEPARATOR: &str = " … ";

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid markup pattern"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Build the display snippet for one hit.
///
/// Highlight fragments are joined as-is (they carry the configured
/// markers); the fallback path strips markup and truncates, with no
/// highlighting.
pub fn extract_snippet(highlight_fragments: &[String], body: &str) -> String {
    if !highlight_fragments.is_empty() {
        return highlight_fragments.join(FRAGMENT_SEPARATOR);
    }

    truncate(&strip_markup(body), SNIPPET_MAX_CHARS)
}

/// Remove tags, decode HTML entities and collapse whitespace.
pub fn strip_markup(text: &str) -> String {
    let without_tags = MARKUP.replace_all(text, " ");
    let decoded = html_escape::decode_html_entities(without_tags.as_ref());
    WHITESPACE
        .replace_all(decoded.trim(), " ")
        .into_owned()
}

// Truncates on a char boundary so multibyte text never splits.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_fragments_preferred() {
        let fragments = vec![
            "<strong>renewals</strong> at the desk".to_string(),
            "card <strong>renewals</strong> online".to_string(),
        ];

        assert_eq!(
            extract_snippet(&fragments, "<p>ignored body</p>"),
            "<strong>renewals</strong> at the desk … card <strong>renewals</strong> online"
        );
    }

    #[test]
    fn test_fallback_strips_markup() {
        let body = "<p>Renewals&nbsp;are handled  at the <em>front</em> desk.</p>";

        assert_eq!(
            extract_snippet(&[], body),
            "Renewals are handled at the front desk."
        );
    }

    #[test]
    fn test_fallback_truncates_on_char_boundary() {
        let body = "ä".repeat(SNIPPET_MAX_CHARS + 50);
        let snippet = extract_snippet(&[], &body);

        assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS + 1);
        assert!(snippet.ends_with('…'));
    }

    #[test]
    fn test_short_body_untouched() {
        assert_eq!(extract_snippet(&[], "short text"), "short text");
    }

    #[test]
    fn test_empty_body_yields_empty_snippet() {
        assert_eq!(extract_snippet(&[], ""), "");
    }
}
