use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the cluster API CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// The cluster API client reported an error.
    ///
    /// Covers validation failures detected before a request is sent as well as
    /// transport failures while talking to the API.
    #[error("Cluster API error: {0}")]
    Client(#[from] cluster_api_client::Error),

    /// Configuration error occurred while loading or parsing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid command-line arguments were provided.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Command output could not be rendered as JSON.
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}
