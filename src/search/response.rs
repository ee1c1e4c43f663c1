//! Engine response wire contract
//!
//! Mirrors the subset of the engine's `_search` response this surface
//! consumes. Deserialization tolerates unknown fields; the loosely
//! structured per-hit field payload is reduced to the typed values the
//! hydrator needs at this boundary.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::models::EntityKey;

/// Envelope of one `_search` call.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineResponse {
    /// Engine-reported elapsed milliseconds
    #[serde(default)]
    pub took: u64,

    /// Hit envelope
    pub hits: HitsEnvelope,
}

impl EngineResponse {
    /// Lift every wire hit into its typed form, preserving engine order.
    pub fn raw_hits(&self) -> Vec<RawHit> {
        self.hits.hits.iter().map(EngineHit::to_raw).collect()
    }
}

/// Total count plus the hits of the requested page.
#[derive(Debug, Clone, Deserialize)]
pub struct HitsEnvelope {
    /// Total matches before pagination
    pub total: u64,

    /// Hits of the requested page, score-sorted by the engine
    #[serde(default)]
    pub hits: Vec<EngineHit>,
}

/// One matched document as returned by the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineHit {
    /// Relevance score
    #[serde(rename = "_score", default)]
    pub score: f32,

    /// Indexed document source
    #[serde(rename = "_source")]
    pub source: HitSource,

    /// Highlight fragments, when highlighting matched
    #[serde(default)]
    pub highlight: Option<HitHighlight>,
}

impl EngineHit {
    /// Reduce the wire hit to the typed values hydration consumes.
    pub fn to_raw(&self) -> RawHit {
        RawHit {
            key: EntityKey::new(self.source.entity_type.clone(), self.source.id),
            score: self.score,
            created_at: self
                .source
                .created
                .as_deref()
                .and_then(parse_created),
            body: self.source.body.clone(),
            highlighted_body: self
                .highlight
                .as_ref()
                .map(|highlight| highlight.body.clone())
                .unwrap_or_default(),
            auxiliary_score: self.auxiliary_score(),
        }
    }

    // The index stores a per-entity-type field bag; the display rating
    // lives at fields.<entity_type>.score.
    fn auxiliary_score(&self) -> Option<f64> {
        self.source
            .fields
            .get(&self.source.entity_type)?
            .get("score")?
            .as_f64()
    }
}

/// Indexed document fields consumed by this surface.
#[derive(Debug, Clone, Deserialize)]
pub struct HitSource {
    /// Entity type discriminator
    pub entity_type: String,

    /// Entity id in primary storage
    pub id: u64,

    /// Creation timestamp as indexed
    #[serde(default)]
    pub created: Option<String>,

    /// Index copy of the body text, markup included
    #[serde(default)]
    pub body: Option<String>,

    /// Loosely structured per-document field payload
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Highlight fragments for one hit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitHighlight {
    /// Fragments for the body field
    #[serde(default)]
    pub body: Vec<String>,
}

/// A raw hit lifted out of the wire envelope.
#[derive(Debug, Clone)]
pub struct RawHit {
    /// Key of the entity this hit claims to represent
    pub key: EntityKey,

    /// Relevance score
    pub score: f32,

    /// Creation timestamp, when the indexed value parsed
    pub created_at: Option<DateTime<Utc>>,

    /// Index copy of the body text
    pub body: Option<String>,

    /// Highlight fragments for the body field
    pub highlighted_body: Vec<String>,

    /// Display-only rating carried in the per-hit field payload
    pub auxiliary_score: Option<f64>,
}

// Indexed timestamps arrive in whatever shape the indexing job produced:
// RFC 3339, a bare datetime, or unix seconds.
fn parse_created(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_fixture() -> EngineResponse {
        serde_json::from_value(json!({
            "took": 12,
            "timed_out": false,
            "hits": {
                "total": 2,
                "max_score": 4.2,
                "hits": [
                    {
                        "_score": 4.2,
                        "_source": {
                            "entity_type": "question",
                            "id": 42,
                            "created": "2024-03-01T09:30:00Z",
                            "body": "<p>Front desk renewals</p>",
                            "fields": {
                                "question": { "score": 3.5 }
                            }
                        },
                        "highlight": {
                            "body": ["<strong>renewals</strong> at the desk"]
                        }
                    },
                    {
                        "_score": 1.1,
                        "_source": {
                            "entity_type": "question",
                            "id": 7,
                            "created": "1393666200"
                        }
                    }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_envelope_deserialization() {
        let response = response_fixture();

        assert_eq!(response.took, 12);
        assert_eq!(response.hits.total, 2);
        assert_eq!(response.hits.hits.len(), 2);
    }

    #[test]
    fn test_raw_hit_lifting() {
        let hits = response_fixture().raw_hits();

        assert_eq!(hits[0].key, EntityKey::question(42));
        assert_eq!(hits[0].score, 4.2);
        assert_eq!(hits[0].auxiliary_score, Some(3.5));
        assert_eq!(
            hits[0].highlighted_body,
            vec!["<strong>renewals</strong> at the desk".to_string()]
        );

        assert_eq!(hits[1].key, EntityKey::question(7));
        assert!(hits[1].highlighted_body.is_empty());
        assert_eq!(hits[1].auxiliary_score, None);
        assert!(hits[1].body.is_none());
    }

    #[test]
    fn test_created_timestamp_formats() {
        assert!(parse_created("2024-03-01T09:30:00Z").is_some());
        assert!(parse_created("2024-03-01 09:30:00").is_some());
        assert!(parse_created("1393666200").is_some());
        assert!(parse_created("yesterday").is_none());
    }

    #[test]
    fn test_auxiliary_score_requires_matching_entity_bag() {
        let response: EngineResponse = serde_json::from_value(json!({
            "hits": {
                "total": 1,
                "hits": [{
                    "_score": 1.0,
                    "_source": {
                        "entity_type": "question",
                        "id": 1,
                        "fields": {
                            "other_entity": { "score": 9.0 }
                        }
                    }
                }]
            }
        }))
        .unwrap();

        assert_eq!(response.raw_hits()[0].auxiliary_score, None);
    }
}
