//! Shared helpers for integration tests

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use qna_search::models::{EntityKey, Question};
use qna_search::search::{
    EngineResponse, InMemoryResolver, RecordResolver, SearchEngine, SearchResult,
};

/// Build a question record with sensible defaults
pub fn question(id: u64, title: &str) -> Question {
    Question {
        id,
        title: title.to_string(),
        body: format!("<p>Body of question {}</p>", id),
        language: "en".to_string(),
        canonical_url: format!("https://qna.example.org/questions/{}", id),
        created_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        tags: vec![],
        feeds: vec![],
    }
}

/// Build an engine hit document for the canned response
pub fn hit(id: u64, score: f32) -> serde_json::Value {
    serde_json::json!({
        "_score": score,
        "_source": {
            "entity_type": "question",
            "id": id,
            "created": "2024-03-01T09:30:00Z",
            "body": format!("<p>Indexed body of question {}</p>", id),
        },
        "highlight": {
            "body": [format!("<strong>match</strong> in question {}", id)]
        }
    })
}

/// Build a full engine response from hit documents
pub fn engine_response(total: u64, hits: Vec<serde_json::Value>) -> EngineResponse {
    serde_json::from_value(serde_json::json!({
        "took": 12,
        "hits": { "total": total, "hits": hits }
    }))
    .unwrap()
}

/// Engine stub returning a canned response and recording the sent body
pub struct StubEngine {
    response: EngineResponse,
    pub sent_bodies: Mutex<Vec<serde_json::Value>>,
}

impl StubEngine {
    pub fn new(response: EngineResponse) -> Self {
        Self {
            response,
            sent_bodies: Mutex::new(Vec::new()),
        }
    }

    pub fn last_body(&self) -> serde_json::Value {
        self.sent_bodies.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl SearchEngine for StubEngine {
    async fn search(&self, body: &serde_json::Value) -> SearchResult<EngineResponse> {
        self.sent_bodies.lock().unwrap().push(body.clone());
        Ok(self.response.clone())
    }
}

/// Resolver wrapper counting batched lookup calls
#[derive(Default)]
pub struct CountingResolver {
    inner: InMemoryResolver,
    pub calls: AtomicUsize,
}

impl CountingResolver {
    pub fn with_records(records: Vec<Question>) -> Self {
        let inner = InMemoryResolver::new();
        for record in records {
            inner.insert(record);
        }
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordResolver for CountingResolver {
    async fn resolve(&self, keys: &[EntityKey]) -> SearchResult<HashMap<EntityKey, Question>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve(keys).await
    }
}
