//! Faceted full-text search over the Q&A archive
//!
//! This module contains the whole search surface:
//!
//! - **Query compilation**: free text plus facet selections become a
//!   structured boolean query with highlight directives
//! - **Hydration**: raw engine hits are resolved back to authoritative
//!   records, stale index entries are dropped and reported
//! - **Pagination**: derived once per response, page size fixed at 10
//! - **Transport**: HTTP `_search` client with engine faults surfaced
//!   distinctly from storage faults
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │              SearchSession                       │
//! │  parse_parameters() → search() → update_index()  │
//! └──────────────────────────────────────────────────┘
//!          │                │                 │
//!          ▼                ▼                 ▼
//!   QueryCompiler      SearchEngine      ResultHydrator
//!   (pure, per-call)   (HTTP, timeout)   (one batched
//!                                         RecordResolver call)
//! ```
//!
//! One search performs at most one engine call and one batched
//! primary-storage lookup, executed sequentially. Everything is
//! request-scoped; concurrent searches share no mutable state.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use qna_search::config::EngineConfig;
//! use qna_search::search::{HttpSearchEngine, InMemoryResolver, SearchSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let engine = Arc::new(HttpSearchEngine::new(&config)?);
//!     let resolver = Arc::new(InMemoryResolver::new());
//!
//!     let session = SearchSession::new(engine, resolver, "en");
//!     let params = session.parse_parameters([("keys", "library hours"), ("tags", "7,12")]);
//!
//!     let hydrated = session.search(&params).await?;
//!     println!("{} results", hydrated.results.len());
//!
//!     Ok(())
//! }
//! ```

mod engine;
mod error;
mod facet;
mod hydrate;
mod indexer;
mod params;
mod query;
mod resolver;
mod response;
mod session;
mod snippet;

pub use engine::{HttpSearchEngine, SearchEngine};
pub use error::{SearchError, SearchResult};
pub use facet::FacetCodec;
pub use hydrate::{Hydrated, PaginationState, ResolvedResult, ResultHydrator, PAGE_SIZE};
pub use indexer::{IndexStatus, Indexer};
pub use params::{SearchParameters, RECOGNIZED_PARAMETERS};
pub use query::{Clause, CompiledQuery, HighlightSpec, QueryCompiler};
pub use resolver::{InMemoryResolver, RecordResolver};
pub use response::{EngineHit, EngineResponse, HitsEnvelope, RawHit};
pub use session::SearchSession;
pub use snippet::extract_snippet;
