//! Error types for search operations

use crate::error::AppError;

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
///
/// Engine-level faults fail the whole search; per-record faults (stale
/// index entries, unparseable facet tokens) never appear here — they are
/// handled by dropping the offending item and warning.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Engine rejected the compiled query; indicates a compiler defect
    #[error("Query rejected by engine: {0}")]
    QueryRejected(String),

    /// Engine could not be reached or answered with a server fault
    #[error("Search engine unreachable: {0}")]
    EngineUnreachable(String),

    /// Engine call exceeded its timeout
    #[error("Search request timed out after {0} seconds")]
    Timeout(u64),

    /// Engine answered with a body this crate cannot decode
    #[error("Failed to decode engine response: {0}")]
    ResponseDecode(String),

    /// The batched primary-storage lookup failed as a whole
    #[error("Record resolution failed: {0}")]
    ResolverFailed(String),

    /// Indexing batch failed
    #[error("Indexing failed: {0}")]
    IndexingFailed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidConfiguration(msg) => AppError::Configuration(msg),
            SearchError::EngineUnreachable(msg) => AppError::Network(msg),
            SearchError::Timeout(secs) => {
                AppError::Timeout(format!("search timed out after {}s", secs))
            }
            SearchError::ResolverFailed(msg) => AppError::Storage(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}
