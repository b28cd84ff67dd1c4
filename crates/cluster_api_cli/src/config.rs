//! Configuration management for the cluster API CLI.
//!
//! The configuration is stored in TOML format and can be loaded from a
//! specified file path or from the default location in the current directory.
//! The API base URL can be overridden through the environment.

use std::{
    fs,
    path::{Path, PathBuf},
};

use cluster_api_client::ClientConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cluster-api.toml";

/// Base URL written by `config init`
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1/";

/// Environment variable that overrides `client.base_url`
pub const BASE_URL_ENV_VAR: &str = "CLUSTER_API_BASE_URL";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the cluster API CLI.
///
/// # Example TOML Configuration
///
/// ```toml
/// [client]
/// base_url = "https://cluster-api.example.com/api/v1/"
/// timeout_seconds = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Connection settings for the API client
    pub client: ClientConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if:
    /// - The specified file does not exist
    /// - The file cannot be read
    /// - The file contains invalid TOML or does not match the expected schema
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads configuration and applies the `CLUSTER_API_BASE_URL` override.
    pub fn load_with_env(path: &Path) -> Result<Self, Error> {
        let config = Self::load(path)?;
        Ok(config.with_base_url_override(std::env::var(BASE_URL_ENV_VAR).ok()))
    }

    /// Replaces the base URL when `base_url` is set and not blank.
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            debug!(base_url = %base_url, "Overriding base URL from environment");
            self.client.base_url = base_url;
        }
        self
    }

    /// Saves the configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::new(DEFAULT_BASE_URL),
        }
    }
}

/// Resolves the path to the configuration file.
///
/// - If `config_path` is `Some(path)`, returns that path as a `PathBuf`
/// - If `config_path` is `None`, returns `./cluster-api.toml` in the current directory
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
