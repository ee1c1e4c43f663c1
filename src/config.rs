use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Search engine configuration
    pub engine: EngineConfig,

    /// Incremental indexing configuration
    #[serde(default)]
    pub indexing: IndexingConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: QNA_SEARCH_)
            .add_source(
                config::Environment::with_prefix("QNA_SEARCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

/// Connection settings for the external search engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Index queried by this search surface
    #[serde(default = "default_index")]
    pub index: String,

    /// Engine request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Budget for the batched primary-storage lookup (seconds)
    #[serde(default = "default_resolver_timeout")]
    pub resolver_timeout_secs: u64,

    /// Marker inserted before each highlighted match
    #[serde(default = "default_highlight_pre")]
    pub highlight_pre_tag: String,

    /// Marker inserted after each highlighted match
    #[serde(default = "default_highlight_post")]
    pub highlight_post_tag: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            index: default_index(),
            request_timeout_secs: default_request_timeout(),
            resolver_timeout_secs: default_resolver_timeout(),
            highlight_pre_tag: default_highlight_pre(),
            highlight_post_tag: default_highlight_post(),
        }
    }
}

/// Settings handed to the external indexing job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexingConfig {
    /// Items indexed per incremental batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
            service_name: default_service_name(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://127.0.0.1:9200".to_string()
}

fn default_index() -> String {
    "qna".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_resolver_timeout() -> u64 {
    5
}

fn default_highlight_pre() -> String {
    "<strong>".to_string()
}

fn default_highlight_post() -> String {
    "</strong>".to_string()
}

fn default_batch_size() -> usize {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "qna-search".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        assert_eq!(default_request_timeout(), 10);
        assert_eq!(default_batch_size(), 100);
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_highlight_pre(), "<strong>");
    }

    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();
        assert_eq!(config.index, "qna");
        assert_eq!(config.highlight_post_tag, "</strong>");
    }
}
