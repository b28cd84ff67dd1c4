//! Crate for interacting with the cluster management REST API.
//!
//! This crate provides a client that sends [`Request`]s to the API and returns
//! [`Response`]s, plus typed resource endpoints built on top of it. Mutating endpoint
//! calls record the cluster they touched so callers can audit a session afterwards.
//!
//! # Example
//!
//! ```rust,no_run
//! use cluster_api_client::{ClientConfig, ClusterApiClient, ListFilter};
//!
//! # async fn example() -> Result<(), cluster_api_client::Error> {
//! let client = ClusterApiClient::new(ClientConfig::new("https://cluster-api.example.com/api/v1/"))?;
//!
//! let response = client
//!     .htpasswd_users()
//!     .list(Some(ListFilter::new().limit(10)))
//!     .await?;
//! for user in response.data().into_iter().flatten() {
//!     println!("{:?}", user.username);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

pub mod config;
pub use config::ClientConfig;

pub mod errors;
pub use errors::Error;

pub mod htpasswd_users;
pub use htpasswd_users::HtpasswdUsers;

pub mod list_filter;
pub use list_filter::{ListFilter, SortOrder};

pub mod models;
pub use models::HtpasswdUser;

pub mod request;
pub use request::Request;

pub mod response;
pub use response::Response;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Transport seam used by resource endpoints.
///
/// Implementations execute requests and keep the session's affected-cluster log.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Sends a request and returns the API's answer.
    ///
    /// Non-success statuses are returned as a `Response`, not as an error.
    ///
    /// # Errors
    /// Returns `Error::Request` if the API could not be reached or the response could
    /// not be read, and `Error::InvalidUrl` if the request URL cannot be resolved.
    async fn request(&self, request: Request) -> Result<Response, Error>;

    /// Records that a cluster was changed during this session.
    fn add_affected_cluster(&self, cluster_id: u64);
}

/// A client for the cluster API backed by `reqwest`.
#[derive(Debug)]
pub struct ClusterApiClient {
    http: reqwest::Client,
    base_url: Url,
    affected_clusters: Mutex<Vec<u64>>,
}

impl ClusterApiClient {
    /// Creates a new client from the given configuration.
    ///
    /// # Errors
    /// Returns an `Error::Config` if the base URL is invalid or the HTTP client cannot
    /// be built.
    #[instrument(fields(base_url = %config.base_url))]
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let base_url = config.parsed_base_url()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build HTTP client");
                Error::Config(format!("Failed to build HTTP client: {}", e))
            })?;

        info!(
            base_url = %base_url,
            timeout_seconds = config.timeout_seconds,
            "Created cluster API client"
        );

        Ok(Self {
            http,
            base_url,
            affected_clusters: Mutex::new(Vec::new()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Endpoint for htpasswd user records.
    pub fn htpasswd_users(&self) -> HtpasswdUsers<'_, Self> {
        HtpasswdUsers::new(self)
    }

    /// Cluster IDs touched by mutations in this session, in first-touch order.
    pub fn affected_clusters(&self) -> Vec<u64> {
        self.affected_clusters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Empties the affected-cluster log.
    pub fn clear_affected_clusters(&self) {
        self.affected_clusters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

#[async_trait]
impl ClusterClient for ClusterApiClient {
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    async fn request(&self, request: Request) -> Result<Response, Error> {
        let url = self.base_url.join(request.url())?;

        debug!(url = %url, "Sending request to cluster API");

        let mut builder = self.http.request(request.method().clone(), url);
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let http_response = builder.send().await.map_err(|e| {
            error!(error = %e, "Failed to send request to cluster API");
            Error::Request(e)
        })?;

        let status = http_response.status();
        let text = http_response.text().await.map_err(|e| {
            error!(status = %status, error = %e, "Failed to read cluster API response");
            Error::Request(e)
        })?;

        let body = parse_body(status, &text)?;

        debug!(status = %status, "Received response from cluster API");
        Ok(Response::new(status, body))
    }

    fn add_affected_cluster(&self, cluster_id: u64) {
        let mut clusters = self
            .affected_clusters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if !clusters.contains(&cluster_id) {
            clusters.push(cluster_id);
        }
    }
}

/// Turns a response body into JSON.
///
/// Error pages are often plain text or HTML; those are kept as a JSON string so the
/// caller still sees them. A success status with a non-JSON body is an error.
fn parse_body(status: http::StatusCode, text: &str) -> Result<Value, Error> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    match serde_json::from_str(text) {
        Ok(body) => Ok(body),
        Err(_) if !status.is_success() => Ok(Value::String(text.to_string())),
        Err(e) => {
            error!(status = %status, error = %e, "Cluster API returned a non-JSON body");
            Err(Error::Deserialization(e))
        }
    }
}
