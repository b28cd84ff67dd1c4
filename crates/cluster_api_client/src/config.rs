//! Connection settings for [`crate::ClusterApiClient`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::Error;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Settings used to build a [`crate::ClusterApiClient`].
///
/// # Example TOML Configuration
///
/// ```toml
/// base_url = "https://cluster-api.example.com/api/v1/"
/// timeout_seconds = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root of the API; request paths are resolved relative to it.
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "ClientConfig::default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Value of the `User-Agent` header.
    #[serde(default = "ClientConfig::default_user_agent")]
    pub user_agent: String,
}

impl ClientConfig {
    fn default_timeout_seconds() -> u64 {
        DEFAULT_TIMEOUT_SECONDS
    }

    fn default_user_agent() -> String {
        format!("cluster-api-client/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Creates a configuration with default timeout and user agent.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: Self::default_timeout_seconds(),
            user_agent: Self::default_user_agent(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Parses the base URL, making sure it ends with `/`.
    ///
    /// Without the trailing slash `Url::join` would replace the last path segment
    /// instead of appending to it.
    ///
    /// # Errors
    /// Returns `Error::Config` if the URL is not absolute or not http(s).
    pub fn parsed_base_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", self.base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Unsupported base URL scheme '{}'",
                url.scheme()
            )));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}
