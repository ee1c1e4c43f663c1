//! Facet value list codec
//!
//! Facet selections travel as comma-separated value lists (`"7,12"`).
//! The source list may carry free-form tokens, so decoding is permissive:
//! anything that does not parse as a non-negative integer is dropped
//! rather than failing the whole parse.

/// Canonical separator for facet value lists
pub const FACET_SEPARATOR: &str = ",";

/// Encodes and decodes facet value lists
pub struct FacetCodec;

impl FacetCodec {
    /// Decode a raw facet list into an ordered, deduplicated value set.
    ///
    /// Splits on the canonical separator, trims whitespace, drops empty
    /// segments and discards non-numeric tokens silently. Never fails;
    /// degrades by omission.
    pub fn decode(raw: &str) -> Vec<u64> {
        let mut values = Vec::new();

        for segment in raw.split(FACET_SEPARATOR) {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            if let Ok(value) = segment.parse::<u64>() {
                if !values.contains(&value) {
                    values.push(value);
                }
            }
        }

        values
    }

    /// Encode values into the wire representation, preserving input order.
    /// Callers must sort first if canonical order matters.
    pub fn encode<I>(values: I) -> String
    where
        I: IntoIterator<Item = u64>,
    {
        values
            .into_iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(FACET_SEPARATOR)
    }
}
