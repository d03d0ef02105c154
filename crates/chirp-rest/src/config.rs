//! Client configuration.

use std::time::Duration;

use chirp_core::ApiUrl;

/// Base address used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`RestClient`](crate::RestClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the REST backend.
    pub api_url: ApiUrl,

    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_url: ApiUrl) -> Self {
        Self {
            api_url,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: concat!("chirp/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
