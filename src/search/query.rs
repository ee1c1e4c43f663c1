//! Search query compilation
//!
//! Translates free text plus facet selections into the structured boolean
//! query understood by the engine, with highlighting directives. Compilation
//! is deterministic and performs no I/O; the compiled query is a value
//! produced fresh per search call, never cached.

use serde_json::{json, Map, Value};

use crate::config::EngineConfig;
use crate::models::QUESTION_ENTITY_TYPE;
use crate::search::params::SearchParameters;

/// Index field carrying the entity type discriminator
pub const ENTITY_TYPE_FIELD: &str = "entity_type";

/// Fields covered by the free-text clause
pub const TEXT_FIELDS: [&str; 3] = ["body", "title", "tags"];

/// Index field holding the document language
pub const LANGUAGE_FIELD: &str = "langcode";

/// Index field holding both tag and channel term ids
pub const TERMS_FIELD: &str = "terms";

/// Field highlighted in results
pub const HIGHLIGHT_FIELD: &str = "body";

/// One atomic condition within the boolean query.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Exact-match `term` filter on a single field
    ExactTerm { field: &'static str, value: Value },

    /// Relevance-scored `multi_match` over several text fields
    MultiFieldMatch {
        fields: Vec<&'static str>,
        text: String,
    },
}

impl Clause {
    fn to_json(&self) -> Value {
        match self {
            Clause::ExactTerm { field, value } => {
                let mut term = Map::new();
                term.insert((*field).to_string(), value.clone());
                json!({ "term": term })
            }
            Clause::MultiFieldMatch { fields, text } => json!({
                "multi_match": {
                    "query": text,
                    "fields": fields,
                }
            }),
        }
    }
}

/// Highlighting directives attached to a compiled query.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSpec {
    /// Fields to highlight
    pub fields: Vec<&'static str>,

    /// Marker inserted before each match
    pub pre_tag: String,

    /// Marker inserted after each match
    pub post_tag: String,
}

impl Default for HighlightSpec {
    fn default() -> Self {
        Self {
            fields: vec![HIGHLIGHT_FIELD],
            pre_tag: "<strong>".to_string(),
            post_tag: "</strong>".to_string(),
        }
    }
}

/// A fully compiled engine query.
///
/// Clause order is insertion order: entity-type clause, text clause,
/// language clause, then one clause per facet value. The order barely
/// affects engine cost but must stay stable for testability.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    /// Required clauses, in insertion order
    pub must: Vec<Clause>,

    /// Highlighting directives
    pub highlight: HighlightSpec,
}

impl CompiledQuery {
    /// Render the wire document sent to the engine's `_search` endpoint.
    pub fn to_body(&self) -> Value {
        let clauses: Vec<Value> = self.must.iter().map(Clause::to_json).collect();

        let mut highlight_fields = Map::new();
        for field in &self.highlight.fields {
            highlight_fields.insert((*field).to_string(), json!({}));
        }

        json!({
            "query": {
                "bool": {
                    "must": clauses,
                }
            },
            "highlight": {
                "fields": highlight_fields,
                "pre_tags": [&self.highlight.pre_tag],
                "post_tags": [&self.highlight.post_tag],
            }
        })
    }
}

/// Compiles search parameters into engine queries.
#[derive(Debug, Clone, Default)]
pub struct QueryCompiler {
    highlight: HighlightSpec,
}

impl QueryCompiler {
    /// Create a compiler with the default highlight markers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler with the configured highlight markers
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            highlight: HighlightSpec {
                pre_tag: config.highlight_pre_tag.clone(),
                post_tag: config.highlight_post_tag.clone(),
                ..HighlightSpec::default()
            },
        }
    }

    /// Compile one request into an engine query.
    pub fn compile(&self, params: &SearchParameters, active_language: &str) -> CompiledQuery {
        let mut must = Vec::new();

        // This surface only ever returns question documents. Answers are
        // indexed as children of their question and surface through it.
        must.push(Clause::ExactTerm {
            field: ENTITY_TYPE_FIELD,
            value: QUESTION_ENTITY_TYPE.into(),
        });

        // Empty free text is legal and matches broadly; callers relying on
        // "no text, no results" must pre-filter.
        must.push(Clause::MultiFieldMatch {
            fields: TEXT_FIELDS.to_vec(),
            text: params.free_text.clone(),
        });

        if !params.all_languages {
            must.push(Clause::ExactTerm {
                field: LANGUAGE_FIELD,
                value: active_language.into(),
            });
        }

        // Each selected facet value becomes its own required term clause:
        // selecting two channels matches documents carrying BOTH, not
        // either. All-of semantics are kept as-observed; collapsing these
        // into a single any-of terms filter would silently change result
        // semantics.
        for feed_id in &params.feed_ids {
            must.push(Clause::ExactTerm {
                field: TERMS_FIELD,
                value: (*feed_id).into(),
            });
        }

        for tag_id in &params.tag_ids {
            must.push(Clause::ExactTerm {
                field: TERMS_FIELD,
                value: (*tag_id).into(),
            });
        }

        CompiledQuery {
            must,
            highlight: self.highlight.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term_clauses<'a>(query: &'a CompiledQuery, field: &str) -> Vec<&'a Value> {
        query
            .must
            .iter()
            .filter_map(|clause| match clause {
                Clause::ExactTerm { field: f, value } if *f == field => Some(value),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_plain_text_search_compiles_three_clauses() {
        let params = SearchParameters::new("library hours");
        let query = QueryCompiler::new().compile(&params, "en");

        assert_eq!(query.must.len(), 3);
        assert_eq!(
            query.must[0],
            Clause::ExactTerm {
                field: ENTITY_TYPE_FIELD,
                value: "question".into(),
            }
        );
        assert_eq!(
            query.must[1],
            Clause::MultiFieldMatch {
                fields: vec!["body", "title", "tags"],
                text: "library hours".to_string(),
            }
        );
        assert_eq!(
            query.must[2],
            Clause::ExactTerm {
                field: LANGUAGE_FIELD,
                value: "en".into(),
            }
        );
    }

    #[test]
    fn test_all_languages_omits_language_clause() {
        let params = SearchParameters::new("kirjasto").with_all_languages(true);
        let query = QueryCompiler::new().compile(&params, "fi");

        assert!(term_clauses(&query, LANGUAGE_FIELD).is_empty());
        assert_eq!(query.must.len(), 2);
    }

    #[test]
    fn test_one_required_clause_per_facet_value() {
        let params = SearchParameters::new("").with_tags(vec![7, 12]);
        let query = QueryCompiler::new().compile(&params, "en");

        let terms = term_clauses(&query, TERMS_FIELD);
        assert_eq!(terms.len(), 2);
        assert_eq!(*terms[0], Value::from(7u64));
        assert_eq!(*terms[1], Value::from(12u64));
    }

    #[test]
    fn test_feeds_precede_tags_in_clause_order() {
        let params = SearchParameters::new("")
            .with_feeds(vec![3])
            .with_tags(vec![7]);
        let query = QueryCompiler::new().compile(&params, "en");

        let terms = term_clauses(&query, TERMS_FIELD);
        assert_eq!(*terms[0], Value::from(3u64));
        assert_eq!(*terms[1], Value::from(7u64));
    }

    #[test]
    fn test_empty_free_text_is_legal() {
        let params = SearchParameters::default();
        let query = QueryCompiler::new().compile(&params, "en");

        assert_eq!(
            query.must[1],
            Clause::MultiFieldMatch {
                fields: vec!["body", "title", "tags"],
                text: String::new(),
            }
        );
    }

    #[test]
    fn test_wire_body_shape() {
        let params = SearchParameters::new("library hours").with_tags(vec![7]);
        let body = QueryCompiler::new().compile(&params, "en").to_body();

        assert_eq!(
            body,
            serde_json::json!({
                "query": {
                    "bool": {
                        "must": [
                            { "term": { "entity_type": "question" } },
                            {
                                "multi_match": {
                                    "query": "library hours",
                                    "fields": ["body", "title", "tags"],
                                }
                            },
                            { "term": { "langcode": "en" } },
                            { "term": { "terms": 7 } },
                        ]
                    }
                },
                "highlight": {
                    "fields": { "body": {} },
                    "pre_tags": ["<strong>"],
                    "post_tags": ["</strong>"],
                }
            })
        );
    }

    #[test]
    fn test_configured_highlight_markers() {
        let config = EngineConfig {
            highlight_pre_tag: "<em>".to_string(),
            highlight_post_tag: "</em>".to_string(),
            ..EngineConfig::default()
        };
        let params = SearchParameters::new("hours");
        let query = QueryCompiler::from_config(&config).compile(&params, "en");

        assert_eq!(query.highlight.pre_tag, "<em>");
        assert_eq!(query.highlight.post_tag, "</em>");
        assert_eq!(query.highlight.fields, vec!["body"]);
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let params = SearchParameters::new("hours")
            .with_tags(vec![7, 12])
            .with_feeds(vec![3]);
        let compiler = QueryCompiler::new();

        assert_eq!(
            compiler.compile(&params, "en").to_body(),
            compiler.compile(&params, "en").to_body()
        );
    }
}
