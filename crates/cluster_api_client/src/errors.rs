//! Error types for cluster API client operations.
//!
//! This module defines the error types that can occur when talking to the cluster API
//! through the cluster_api_client crate. Non-success HTTP statuses are not part of this
//! enum; they are returned as a [`crate::Response`] for the caller to inspect.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during cluster API client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use cluster_api_client::Error;
///
/// match client.htpasswd_users().create(&user).await {
///     Ok(response) if response.is_success() => println!("Created"),
///     Ok(response) => eprintln!("API refused the request: {}", response.status()),
///     Err(Error::Validation { fields, .. }) => eprintln!("Missing fields: {:?}", fields),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Client construction failed.
    ///
    /// Raised when the configuration cannot be turned into a working HTTP client, for
    /// example because the base URL is not absolute or the TLS backend fails to load.
    #[error("Failed to configure cluster API client: {0}")]
    Config(String),

    /// Error deserializing the response from the cluster API.
    ///
    /// The API answered with a success status but the body could not be mapped into
    /// the expected model.
    #[error("Failed to deserialize cluster API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The request URL could not be resolved against the configured base URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be sent or the response could not be read.
    ///
    /// Covers connection failures, timeouts and broken response streams.
    #[error("Request to cluster API failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Required fields were missing from a model passed to a mutating operation.
    ///
    /// Raised before any request is built, so no network call has been made.
    #[error("Missing required fields for {operation}: {}", .fields.join(", "))]
    Validation {
        /// The operation that was attempted (`create`, `update`, ...).
        operation: &'static str,
        /// The names of all missing fields, in declaration order.
        fields: Vec<&'static str>,
    },
}
