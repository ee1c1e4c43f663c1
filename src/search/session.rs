//! Search session orchestration

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::search::engine::SearchEngine;
use crate::search::error::{SearchError, SearchResult};
use crate::search::hydrate::{Hydrated, ResultHydrator, PAGE_SIZE};
use crate::search::indexer::{IndexStatus, Indexer};
use crate::search::params::SearchParameters;
use crate::search::query::QueryCompiler;
use crate::search::resolver::RecordResolver;

/// Request-scoped search orchestration: compile the query, call the
/// engine, hydrate the response.
///
/// Owns the set of recognized search parameters and the active language
/// of the request. Sessions share no mutable state; concurrent searches
/// are fully independent.
pub struct SearchSession {
    engine: Arc<dyn SearchEngine>,
    resolver: Arc<dyn RecordResolver>,
    indexer: Option<Arc<dyn Indexer>>,
    compiler: QueryCompiler,
    active_language: String,
    resolver_timeout: Duration,
}

impl SearchSession {
    /// Create a session for one request's language context.
    pub fn new(
        engine: Arc<dyn SearchEngine>,
        resolver: Arc<dyn RecordResolver>,
        active_language: impl Into<String>,
    ) -> Self {
        Self {
            engine,
            resolver,
            indexer: None,
            compiler: QueryCompiler::new(),
            active_language: active_language.into(),
            resolver_timeout: Duration::from_secs(5),
        }
    }

    /// Use the configured highlight markers and resolver budget.
    pub fn with_engine_config(mut self, config: &EngineConfig) -> Self {
        self.compiler = QueryCompiler::from_config(config);
        self.resolver_timeout = Duration::from_secs(config.resolver_timeout_secs);
        self
    }

    /// Attach the external indexing job.
    pub fn with_indexer(mut self, indexer: Arc<dyn Indexer>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    /// Override the primary-storage lookup budget.
    pub fn with_resolver_timeout(mut self, timeout: Duration) -> Self {
        self.resolver_timeout = timeout;
        self
    }

    /// Parse recognized external parameters into request input.
    /// Unrecognized keys are ignored.
    pub fn parse_parameters<'a, I>(&self, pairs: I) -> SearchParameters
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        SearchParameters::from_pairs(pairs)
    }

    /// Run one search end to end: at most one engine call and one batched
    /// primary-storage lookup, executed sequentially.
    pub async fn search(&self, params: &SearchParameters) -> SearchResult<Hydrated> {
        let compiled = self.compiler.compile(params, &self.active_language);

        let mut body = compiled.to_body();
        // Engine-side paging; hydration clamps the page against the
        // reported total.
        body["from"] = (params.page * PAGE_SIZE).into();
        body["size"] = PAGE_SIZE.into();

        let response = self.engine.search(&body).await?;

        let hydrated = tokio::time::timeout(
            self.resolver_timeout,
            ResultHydrator::hydrate(&response, self.resolver.as_ref(), params.page),
        )
        .await
        .map_err(|_| {
            SearchError::ResolverFailed(format!(
                "record resolution timed out after {}s",
                self.resolver_timeout.as_secs()
            ))
        })??;

        for warning in &hydrated.warnings {
            warn!(%warning, "Dropped stale search hit");
        }

        info!(
            total_hits = hydrated.pagination.total_hits,
            returned = hydrated.results.len(),
            dropped = hydrated.warnings.len(),
            took_ms = hydrated.took_ms,
            page = hydrated.pagination.current_page,
            "Search completed"
        );

        Ok(hydrated)
    }

    /// Run one incremental indexing batch via the attached indexer.
    pub async fn update_index(&self) -> SearchResult<usize> {
        match &self.indexer {
            Some(indexer) => indexer.update_index().await,
            None => Err(SearchError::InvalidConfiguration(
                "no indexer attached to this session".to_string(),
            )),
        }
    }

    /// Report indexing progress via the attached indexer.
    pub async fn index_status(&self) -> SearchResult<IndexStatus> {
        match &self.indexer {
            Some(indexer) => indexer.index_status().await,
            None => Err(SearchError::InvalidConfiguration(
                "no indexer attached to this session".to_string(),
            )),
        }
    }
}
