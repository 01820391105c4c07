//! Connection settings for the catalog API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Production catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.glose.com";

/// Account whose shelves are listed when none is configured.
pub const DEFAULT_USER_ID: &str = "5a8411b53ed02c04187ff02a";

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and as whom the client talks to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, without a trailing path (e.g., `https://api.glose.com`).
    pub base_url: String,
    /// User id whose shelves are listed.
    pub user_id: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Configuration pointing at a custom base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Configuration listing another user's shelves.
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Request timeout as a [`Duration`]. Zero disables the timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.user_id, DEFAULT_USER_ID);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = ApiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ApiConfig = toml::from_str("user_id = \"someone\"").unwrap();
        assert_eq!(config.user_id, "someone");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
