//! Result hydration
//!
//! Reconciles the eventually consistent search index with strongly
//! consistent primary storage: every hit on the page is resolved back to
//! its authoritative record in a single batched lookup, stale index
//! entries are dropped and reported, and pagination state is derived once
//! per response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{EntityKey, Question};
use crate::search::error::SearchResult;
use crate::search::resolver::RecordResolver;
use crate::search::response::{EngineResponse, RawHit};
use crate::search::snippet;

/// Fixed result page size for this surface
pub const PAGE_SIZE: usize = 10;

/// Pagination metadata derived once per search response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Total matches before pagination
    pub total_hits: u64,

    /// Results per page
    pub page_size: usize,

    /// Zero-based current page, clamped into range
    pub current_page: usize,
}

impl PaginationState {
    /// Derive pagination from a response total, clamping the requested
    /// page into `[0, page_count - 1]`.
    pub fn new(total_hits: u64, page_size: usize, requested_page: usize) -> Self {
        let mut state = Self {
            total_hits,
            page_size,
            current_page: 0,
        };
        state.current_page = requested_page.min(state.page_count().saturating_sub(1));
        state
    }

    /// Number of pages needed for all hits
    pub fn page_count(&self) -> usize {
        self.total_hits.div_ceil(self.page_size as u64) as usize
    }

    /// Offset of the current page
    pub fn offset(&self) -> usize {
        self.current_page * self.page_size
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.page_count()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }
}

/// One presentable, authoritative-record-backed search result.
///
/// Holds the backing record's key, not the record itself; the record's
/// lifecycle is governed entirely by primary storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedResult {
    /// Key of the backing record
    pub key: EntityKey,

    /// Record title (authoritative, never the index copy)
    pub title: String,

    /// Absolute canonical URL (authoritative)
    pub canonical_url: String,

    /// Relevance score, from the hit
    pub score: f32,

    /// Creation timestamp, from the hit
    pub created_at: DateTime<Utc>,

    /// Record language code (authoritative)
    pub language: String,

    /// Display snippet
    pub snippet: String,

    /// Display-only rating, when the hit carried one
    pub auxiliary_score: Option<f64>,
}

/// Hydration output: ordered results plus response-scoped metadata.
#[derive(Debug, Clone)]
pub struct Hydrated {
    /// Results in engine hit order, stale entries removed
    pub results: Vec<ResolvedResult>,

    /// Pagination derived from the response total
    pub pagination: PaginationState,

    /// Engine-reported elapsed milliseconds
    pub took_ms: u64,

    /// One entry per stale index hit that was dropped
    pub warnings: Vec<String>,

    /// Invalidation keys for downstream response caches, one per result
    pub cache_keys: Vec<String>,
}

/// Turns raw engine hits into caller-facing results.
pub struct ResultHydrator;

impl ResultHydrator {
    /// Hydrate one engine response.
    ///
    /// Issues exactly one batched resolver call regardless of hit count.
    /// A hit whose record is missing is a recoverable inconsistency
    /// between index and primary store: it is dropped with a warning,
    /// never failing the whole search.
    pub async fn hydrate(
        response: &EngineResponse,
        resolver: &dyn RecordResolver,
        requested_page: usize,
    ) -> SearchResult<Hydrated> {
        let pagination = PaginationState::new(response.hits.total, PAGE_SIZE, requested_page);
        let raw_hits = response.raw_hits();

        let keys: Vec<EntityKey> = raw_hits.iter().map(|hit| hit.key.clone()).collect();
        let records = resolver.resolve(&keys).await?;

        let mut results = Vec::with_capacity(raw_hits.len());
        let mut warnings = Vec::new();
        let mut cache_keys = Vec::new();

        // Hits arrive score-sorted; output order must match input order.
        for hit in &raw_hits {
            let Some(record) = records.get(&hit.key) else {
                warnings.push(format!(
                    "stale search entry: {} has no authoritative record",
                    hit.key
                ));
                continue;
            };

            results.push(Self::build_result(hit, record));
            cache_keys.push(hit.key.cache_key());
        }

        Ok(Hydrated {
            results,
            pagination,
            took_ms: response.took,
            warnings,
            cache_keys,
        })
    }

    fn build_result(hit: &RawHit, record: &Question) -> ResolvedResult {
        let body = hit.body.as_deref().unwrap_or(&record.body);

        ResolvedResult {
            key: hit.key.clone(),
            title: record.title.clone(),
            canonical_url: record.canonical_url.clone(),
            score: hit.score,
            // Hit timestamps that failed to parse fall back to the record.
            created_at: hit.created_at.unwrap_or(record.created_at),
            language: record.language.clone(),
            snippet: snippet::extract_snippet(&hit.highlighted_body, body),
            auxiliary_score: hit.auxiliary_score,
        }
    }
}
