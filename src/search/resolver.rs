//! Authoritative record resolution

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

use crate::models::{EntityKey, Question};
use crate::search::error::SearchResult;

/// Batched lookup seam to primary storage.
///
/// Called once per search with every key on the page, bounding round
/// trips to primary storage at one regardless of page size. Keys without
/// a live, accessible record are simply absent from the returned map;
/// a failed call fails the whole search.
#[async_trait]
pub trait RecordResolver: Send + Sync {
    async fn resolve(&self, keys: &[EntityKey]) -> SearchResult<HashMap<EntityKey, Question>>;
}

/// In-memory resolver (for MVP and testing)
#[derive(Clone, Default)]
pub struct InMemoryResolver {
    records: Arc<DashMap<EntityKey, Question>>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record under its entity key
    pub fn insert(&self, record: Question) {
        self.records.insert(record.entity_key(), record);
    }

    /// Drop a record, simulating deletion in primary storage
    pub fn remove(&self, key: &EntityKey) {
        self.records.remove(key);
    }
}

#[async_trait]
impl RecordResolver for InMemoryResolver {
    async fn resolve(&self, keys: &[EntityKey]) -> SearchResult<HashMap<EntityKey, Question>> {
        let mut records = HashMap::new();

        for key in keys {
            if let Some(entry) = self.records.get(key) {
                records.insert(key.clone(), entry.clone());
            }
        }

        tracing::debug!(
            requested = keys.len(),
            resolved = records.len(),
            "Resolved search hits against primary storage"
        );

        Ok(records)
    }
}
