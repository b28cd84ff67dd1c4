//! # Models
//!
//! This module contains the resource models exchanged with the cluster API.
//!
//! Models double as caller input and server output, so fields the server assigns
//! (`id`, `cluster_id`) are optional. Unknown fields in server responses are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// An HTTP basic-auth credential stored in an htpasswd file on a cluster.
///
/// # Examples
///
/// ```
/// use cluster_api_client::models::HtpasswdUser;
///
/// let user = HtpasswdUser::new("alice", "s3cret", 7);
/// assert_eq!(user.username.as_deref(), Some("alice"));
/// assert!(user.id.is_none());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtpasswdUser {
    /// Server-assigned ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Login name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Plain-text password; the API stores it hashed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// ID of the htpasswd file the user belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub htpasswd_file_id: Option<u64>,

    /// ID of the cluster the htpasswd file lives on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<u64>,
}

impl HtpasswdUser {
    /// Creates a user ready to be passed to `create`.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        htpasswd_file_id: u64,
    ) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            htpasswd_file_id: Some(htpasswd_file_id),
            ..Default::default()
        }
    }

    /// Returns a copy with the password removed, for display purposes.
    pub fn without_password(&self) -> Self {
        Self {
            password: None,
            ..self.clone()
        }
    }
}

impl fmt::Debug for HtpasswdUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtpasswdUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("htpasswd_file_id", &self.htpasswd_file_id)
            .field("cluster_id", &self.cluster_id)
            .finish()
    }
}
