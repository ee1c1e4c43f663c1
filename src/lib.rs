//! Search core for question/answer knowledge archives.
//!
//! End users run free-text searches over Q&A records held in an external
//! search engine, refined by structured facets (topic tags, distribution
//! channels, language), and get back paginated, highlighted results backed
//! by authoritative records from primary storage.
//!
//! The two non-trivial pieces live in [`search`]: the query compiler
//! (free text + facet selections → boolean engine query with highlight
//! directives) and the result hydrator (raw hits → authoritative-record-
//! backed results, with stale-entry reporting and pagination metadata).
//! Primary storage, the indexing job and the search engine itself are
//! external collaborators reached through trait seams.

pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod search;

pub use config::Config;
pub use error::{AppError, Result};
