//! Client configuration.
//!
//! Use the builder methods to customize, or [`ClientConfig::from_env`] to
//! pick up overrides from the environment.
//!
//! # Example
//!
//! ```ignore
//! use playshare::config::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::default()
//!     .with_base_url("http://localhost:8080")
//!     .with_timeout(Duration::from_secs(5));
//! ```

use std::path::PathBuf;
use std::time::Duration;

/// Default backend URL.
pub const DEFAULT_API_URL: &str = "https://api.playshare.app";

/// Calls never wait less than this.
pub const MIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Calls never wait longer than this.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(15);

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page the backend accepts.
pub const MAX_PAGE_SIZE: u32 = 50;

const ENV_API_URL: &str = "PLAYSHARE_API_URL";
const ENV_TIMEOUT_SECS: &str = "PLAYSHARE_TIMEOUT_SECS";
const ENV_PAGE_SIZE: &str = "PLAYSHARE_PAGE_SIZE";
const ENV_STORE_PATH: &str = "PLAYSHARE_STORE_PATH";

/// Configuration for the API client and its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub base_url: String,
    /// Timeout for ordinary calls
    pub timeout: Duration,
    /// Timeout for sign-in calls
    pub auth_timeout: Duration,
    /// Items requested per page
    pub page_size: u32,
    /// Override for the secure store file location
    pub store_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            auth_timeout: MAX_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
            store_path: None,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from defaults plus `PLAYSHARE_*` environment variables.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }

        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config = config.with_timeout(Duration::from_secs(secs)),
                Err(_) => tracing::warn!("Ignoring invalid {}={:?}", ENV_TIMEOUT_SECS, raw),
            }
        }

        if let Ok(raw) = std::env::var(ENV_PAGE_SIZE) {
            match raw.trim().parse::<u32>() {
                Ok(size) => config = config.with_page_size(size),
                Err(_) => tracing::warn!("Ignoring invalid {}={:?}", ENV_PAGE_SIZE, raw),
            }
        }

        if let Ok(path) = std::env::var(ENV_STORE_PATH) {
            if !path.trim().is_empty() {
                config = config.with_store_path(PathBuf::from(path.trim()));
            }
        }

        config
    }

    /// Set the backend base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the timeout for ordinary calls, clamped to 5–15 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.clamp(MIN_TIMEOUT, MAX_TIMEOUT);
        self
    }

    /// Set the timeout for sign-in calls, clamped to 5–15 seconds.
    pub fn with_auth_timeout(mut self, timeout: Duration) -> Self {
        self.auth_timeout = timeout.clamp(MIN_TIMEOUT, MAX_TIMEOUT);
        self
    }

    /// Set the page size, clamped to 1–50.
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Set where the file-backed secure store lives.
    pub fn with_store_path(mut self, path: PathBuf) -> Self {
        self.store_path = Some(path);
        self
    }

    /// Join a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.store_path.is_none());
    }

    #[test]
    fn test_timeouts_are_clamped() {
        let config = ClientConfig::new().with_timeout(Duration::from_secs(1));
        assert_eq!(config.timeout, MIN_TIMEOUT);

        let config = ClientConfig::new().with_auth_timeout(Duration::from_secs(120));
        assert_eq!(config.auth_timeout, MAX_TIMEOUT);

        let config = ClientConfig::new().with_timeout(Duration::from_secs(7));
        assert_eq!(config.timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(ClientConfig::new().with_page_size(0).page_size, 1);
        assert_eq!(ClientConfig::new().with_page_size(500).page_size, MAX_PAGE_SIZE);
        assert_eq!(ClientConfig::new().with_page_size(20).page_size, 20);
    }

    #[test]
    fn test_base_url_trailing_slash_dropped() {
        let config = ClientConfig::new().with_base_url("http://localhost:8080/");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.url("/api/users/me"), "http://localhost:8080/api/users/me");
    }
}
