//! Outbound request description.

use std::fmt;

use http::Method;
use serde::Serialize;
use serde_json::Value;

use crate::Error;

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// A single call to the cluster API, relative to the configured base URL.
///
/// Requests are plain values: building one never touches the network. They are
/// consumed by [`crate::ClusterClient::request`].
///
/// # Examples
///
/// ```
/// use cluster_api_client::Request;
/// use http::Method;
///
/// let request = Request::new(Method::GET, "htpasswd-users/42");
/// assert_eq!(request.url(), "htpasswd-users/42");
/// assert!(request.body().is_none());
/// ```
#[derive(Clone, PartialEq)]
pub struct Request {
    method: Method,
    url: String,
    body: Option<Value>,
}

impl Request {
    /// Creates a request without a body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    /// Attaches a JSON body serialized from `body`.
    ///
    /// # Errors
    /// Returns `Error::Deserialization` if `body` cannot be represented as JSON.
    pub fn with_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

// Bodies carry credentials, keep them out of logs.
impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}
