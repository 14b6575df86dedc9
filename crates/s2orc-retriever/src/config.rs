//! Configuration for the retriever and its API client.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Graph API endpoint.
    pub const GRAPH_API: &str = "https://api.semanticscholar.org/graph/v1";

    /// Maximum records per search request; the API caps relevance search
    /// pages at 100.
    pub const BATCH_LIMIT: usize = 100;

    /// Sample sizes at or above this threshold are split across year
    /// partitions instead of paginated over a single offset window.
    pub const PAGINATED_LIMIT: usize = 10_000;

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Delay between sequential requests without API key (200ms = 5 req/s).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(200);

    /// Delay between sequential requests with API key (10ms = 100 req/s).
    pub const RATE_LIMIT_DELAY_WITH_KEY: Duration = Duration::from_millis(10);

    /// Maximum retry attempts for transient failures.
    pub const MAX_RETRIES: u32 = 3;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Paper field sets for API requests.
pub mod fields {
    /// Fields requested for embedding retrieval: bibliographic metadata,
    /// the SPECTER embedding vector, and the TLDR summary.
    pub const EMBEDDING: &[&str] = &["title", "authors", "year", "journal", "embedding", "tldr"];

    /// Minimal fields for compact responses.
    pub const MINIMAL: &[&str] = &["title", "year"];
}

/// Retriever configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Semantic Scholar API key (optional).
    pub api_key: Option<String>,

    /// Base URL for the Graph API (overridable for mock servers).
    pub graph_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Delay inserted before each request.
    pub rate_limit_delay: Duration,

    /// Maximum retry attempts for transient failures.
    pub max_retries: u32,
}

impl Config {
    /// Create a new configuration with an optional API key.
    ///
    /// The inter-request delay is adjusted based on key presence:
    /// 5 req/s without a key, 100 req/s with one.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        let has_key = api_key.is_some();
        Self {
            api_key,
            graph_api_url: api::GRAPH_API.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: if has_key {
                api::RATE_LIMIT_DELAY_WITH_KEY
            } else {
                api::RATE_LIMIT_DELAY
            },
            max_retries: api::MAX_RETRIES,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_key: None,
            graph_api_url: format!("{}/graph/v1", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::from_millis(0), // No delay in tests
            max_retries: 0,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `S2_API_KEY`; a missing key is valid (unauthenticated access
    /// with stricter rate limits).
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("S2_API_KEY").ok();
        Ok(Self::new(api_key))
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
