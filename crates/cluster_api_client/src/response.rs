//! Response returned by the cluster API.
//!
//! A [`Response`] always carries the raw JSON body. Endpoints attach typed data to it
//! once the body has been mapped, which only happens for success statuses.

use http::StatusCode;
use serde_json::Value;

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

/// The outcome of a request that reached the cluster API.
///
/// `data` is `None` until an endpoint maps the body; a non-success response is
/// handed back to the caller without data.
///
/// # Examples
///
/// ```
/// use cluster_api_client::Response;
/// use http::StatusCode;
/// use serde_json::json;
///
/// let response = Response::new(StatusCode::NOT_FOUND, json!({"detail": "Not Found"}));
/// assert!(!response.is_success());
/// assert_eq!(response.error_detail().as_deref(), Some("Not Found"));
/// assert!(response.data().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T = Value> {
    status: StatusCode,
    body: Value,
    data: Option<T>,
}

impl Response<Value> {
    /// Creates an unmapped response from a status and a JSON body.
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            data: None,
        }
    }
}

impl<T> Response<T> {
    /// Whether the API answered with a 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The canonical reason phrase for the status, if it has one.
    pub fn status_message(&self) -> Option<&'static str> {
        self.status.canonical_reason()
    }

    /// The raw JSON body. An empty body is `Value::Null`.
    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// The `detail` field of an error body.
    ///
    /// Validation failures report `detail` as a list of objects; those are returned
    /// as their JSON text.
    pub fn error_detail(&self) -> Option<String> {
        match self.body.get("detail")? {
            Value::String(detail) => Some(detail.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Replaces the data, keeping status and body.
    pub fn with_data<U>(self, data: U) -> Response<U> {
        Response {
            status: self.status,
            body: self.body,
            data: Some(data),
        }
    }

    /// Drops any data, retyping the response.
    ///
    /// Used to hand back non-success responses unchanged from typed operations.
    pub fn without_data<U>(self) -> Response<U> {
        Response {
            status: self.status,
            body: self.body,
            data: None,
        }
    }
}
