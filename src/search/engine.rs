//! Search engine transport

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::search::error::{SearchError, SearchResult};
use crate::search::response::EngineResponse;

/// Transport seam to the external search engine.
///
/// One call per search, no retries; retry and backoff belong to the
/// caller's transport layer. Implementations must surface engine-level
/// faults distinctly so callers can render a search-unavailable state
/// instead of an empty result list.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Execute one `_search` call with the given wire body.
    async fn search(&self, body: &serde_json::Value) -> SearchResult<EngineResponse>;
}

/// HTTP implementation speaking the engine's `_search` wire contract.
#[derive(Clone)]
pub struct HttpSearchEngine {
    client: Client,
    search_url: String,
    timeout_secs: u64,
}

impl HttpSearchEngine {
    /// Create a client bound to the configured engine and index.
    pub fn new(config: &EngineConfig) -> SearchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                SearchError::InvalidConfiguration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            search_url: format!(
                "{}/{}/_search",
                config.base_url.trim_end_matches('/'),
                config.index
            ),
            timeout_secs: config.request_timeout_secs,
        })
    }
}

#[async_trait]
impl SearchEngine for HttpSearchEngine {
    async fn search(&self, body: &serde_json::Value) -> SearchResult<EngineResponse> {
        let response = self
            .client
            .post(&self.search_url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    SearchError::EngineUnreachable(format!("failed to connect: {}", e))
                } else {
                    SearchError::EngineUnreachable(e.to_string())
                }
            })?;

        let status = response.status();

        if status.is_client_error() {
            // The engine only rejects bodies this crate compiled, so a 4xx
            // points at a compiler defect and must not be swallowed.
            let detail = response.text().await.unwrap_or_default();
            return Err(SearchError::QueryRejected(format!("{}: {}", status, detail)));
        }

        if !status.is_success() {
            return Err(SearchError::EngineUnreachable(format!(
                "engine returned {}",
                status
            )));
        }

        response
            .json::<EngineResponse>()
            .await
            .map_err(|e| SearchError::ResponseDecode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_construction() {
        let config = EngineConfig {
            base_url: "http://search.local:9200/".to_string(),
            index: "qna".to_string(),
            ..EngineConfig::default()
        };

        let engine = HttpSearchEngine::new(&config).unwrap();
        assert_eq!(engine.search_url, "http://search.local:9200/qna/_search");
    }
}
