//! Request parameters recognized by the search surface

use crate::search::facet::FacetCodec;

/// Query-string keys this surface recognizes; any other key is ignored.
pub const RECOGNIZED_PARAMETERS: [&str; 5] = ["keys", "page", "all_languages", "tags", "feeds"];

/// Structured input of one search request. Immutable once built and
/// discarded after use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParameters {
    /// Free-text query
    pub free_text: String,

    /// Search across all languages instead of the active one
    pub all_languages: bool,

    /// Ordered, deduplicated tag ids; empty means no tag filter
    pub tag_ids: Vec<u64>,

    /// Ordered, deduplicated channel ids; empty means no channel filter
    pub feed_ids: Vec<u64>,

    /// Zero-based result page
    pub page: usize,
}

impl SearchParameters {
    /// Create parameters for a plain free-text search
    pub fn new(free_text: impl Into<String>) -> Self {
        Self {
            free_text: free_text.into(),
            ..Self::default()
        }
    }

    /// Build from external key/value pairs, keeping recognized keys only.
    /// Malformed values degrade to their defaults rather than failing.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            match key {
                "keys" => params.free_text = value.trim().to_string(),
                "page" => params.page = value.trim().parse().unwrap_or(0),
                "all_languages" => params.all_languages = parse_flag(value),
                "tags" => params.tag_ids = FacetCodec::decode(value),
                "feeds" => params.feed_ids = FacetCodec::decode(value),
                _ => {}
            }
        }

        params
    }

    /// Filter by tag ids
    pub fn with_tags(mut self, tag_ids: Vec<u64>) -> Self {
        self.tag_ids = tag_ids;
        self
    }

    /// Filter by channel ids
    pub fn with_feeds(mut self, feed_ids: Vec<u64>) -> Self {
        self.feed_ids = feed_ids;
        self
    }

    /// Allow cross-language results
    pub fn with_all_languages(mut self, all_languages: bool) -> Self {
        self.all_languages = all_languages;
        self
    }

    /// Request a specific result page
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
