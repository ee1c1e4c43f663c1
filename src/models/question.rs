use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Entity type under which questions are indexed. Answers are indexed as
/// children of their question and surfaced through it, so this is the only
/// entity type this search surface ever queries for.
pub const QUESTION_ENTITY_TYPE: &str = "question";

/// Composite key identifying one indexed entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    /// Entity type discriminator as stored in the index
    pub entity_type: String,

    /// Numeric entity id within that type
    pub entity_id: u64,
}

impl EntityKey {
    /// Create a key for an arbitrary entity type
    pub fn new(entity_type: impl Into<String>, entity_id: u64) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id,
        }
    }

    /// Create a key for a question record
    pub fn question(entity_id: u64) -> Self {
        Self::new(QUESTION_ENTITY_TYPE, entity_id)
    }

    /// Invalidation key for downstream response caches
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.entity_type, self.entity_id)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.entity_type, self.entity_id)
    }
}

/// A question record as held by primary storage.
///
/// The search index carries a derived, possibly-stale projection of this
/// record; display fields (title, URL, language) must always come from
/// here, never from the index copy. Lifecycle and access control are
/// governed entirely by primary storage.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Question {
    /// Unique identifier
    pub id: u64,

    /// Human-readable title
    #[validate(length(min = 1, max = 500))]
    pub title: String,

    /// Question body, may contain markup
    pub body: String,

    /// Language code of this record
    #[validate(length(min = 2, max = 12))]
    pub language: String,

    /// Absolute canonical URL
    #[validate(url)]
    pub canonical_url: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Topic tag term ids
    pub tags: Vec<u64>,

    /// Distribution channel term ids
    pub feeds: Vec<u64>,
}

impl Question {
    /// Key under which this record appears in the search index
    pub fn entity_key(&self) -> EntityKey {
        EntityKey::question(self.id)
    }
}
