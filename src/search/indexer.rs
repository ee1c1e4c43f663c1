//! Incremental indexing contract
//!
//! The crawling job that keeps the engine in sync with primary storage
//! lives outside this crate; this is the contract it satisfies. Batch
//! size comes from [`crate::config::IndexingConfig`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::search::error::SearchResult;

/// Progress of the incremental indexer, for status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStatus {
    /// Items eligible for indexing
    pub total_items: u64,

    /// Items already indexed
    pub indexed_items: u64,
}

impl IndexStatus {
    /// Items still waiting for indexing
    pub fn remaining(&self) -> u64 {
        self.total_items.saturating_sub(self.indexed_items)
    }

    /// Completion ratio in `[0.0, 1.0]`; an empty corpus counts as done
    pub fn progress(&self) -> f64 {
        if self.total_items == 0 {
            1.0
        } else {
            self.indexed_items as f64 / self.total_items as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }
}

/// Contract of the external incremental indexing job.
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Perform one incremental batch of indexing work and return the
    /// number of items indexed. Zero means the backlog is exhausted.
    /// Engine-level failures (malformed mapping, engine unavailable)
    /// surface as errors.
    async fn update_index(&self) -> SearchResult<usize>;

    /// Report indexing progress.
    async fn index_status(&self) -> SearchResult<IndexStatus>;
}
