//! Endpoint for htpasswd user records.
//!
//! Every operation builds a [`Request`], sends it through a [`ClusterClient`] and, on a
//! success status, maps the body into [`HtpasswdUser`]s. Create, update and delete also
//! report the cluster they changed to the client.

use http::Method;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::{ClusterClient, Error, HtpasswdUser, ListFilter, Request, Response};

const RESOURCE_PATH: &str = "htpasswd-users";

const CREATE_FIELDS: &[&str] = &["username", "password", "htpasswd_file_id"];
const UPDATE_FIELDS: &[&str] = &["username", "password", "htpasswd_file_id", "id", "cluster_id"];

#[cfg(test)]
#[path = "htpasswd_users_tests.rs"]
mod tests;

/// Body of `POST htpasswd-users`.
#[derive(Serialize, Clone, PartialEq, Eq)]
pub struct CreateHtpasswdUserPayload<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub htpasswd_file_id: u64,
}

impl<'a> TryFrom<&'a HtpasswdUser> for CreateHtpasswdUserPayload<'a> {
    type Error = Error;

    fn try_from(user: &'a HtpasswdUser) -> Result<Self, Self::Error> {
        match (
            non_empty(&user.username),
            non_empty(&user.password),
            user.htpasswd_file_id,
        ) {
            (Some(username), Some(password), Some(htpasswd_file_id)) => Ok(Self {
                username,
                password,
                htpasswd_file_id,
            }),
            _ => Err(Error::Validation {
                operation: "create",
                fields: missing_fields(user, CREATE_FIELDS),
            }),
        }
    }
}

/// Body of `PUT htpasswd-users/{id}`.
#[derive(Serialize, Clone, PartialEq, Eq)]
pub struct UpdateHtpasswdUserPayload<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub htpasswd_file_id: u64,
    pub id: u64,
    pub cluster_id: u64,
}

impl<'a> TryFrom<&'a HtpasswdUser> for UpdateHtpasswdUserPayload<'a> {
    type Error = Error;

    fn try_from(user: &'a HtpasswdUser) -> Result<Self, Self::Error> {
        match (
            non_empty(&user.username),
            non_empty(&user.password),
            user.htpasswd_file_id,
            user.id,
            user.cluster_id,
        ) {
            (
                Some(username),
                Some(password),
                Some(htpasswd_file_id),
                Some(id),
                Some(cluster_id),
            ) => Ok(Self {
                username,
                password,
                htpasswd_file_id,
                id,
                cluster_id,
            }),
            _ => Err(Error::Validation {
                operation: "update",
                fields: missing_fields(user, UPDATE_FIELDS),
            }),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Names from `required` that are unset (or empty) on `user`, in `required` order.
fn missing_fields(user: &HtpasswdUser, required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|field| match *field {
            "username" => non_empty(&user.username).is_none(),
            "password" => non_empty(&user.password).is_none(),
            "htpasswd_file_id" => user.htpasswd_file_id.is_none(),
            "id" => user.id.is_none(),
            "cluster_id" => user.cluster_id.is_none(),
            _ => false,
        })
        .collect()
}

/// List/get/create/update/delete for htpasswd users.
///
/// Borrow one from [`crate::ClusterApiClient::htpasswd_users`], or wrap any
/// [`ClusterClient`] with [`HtpasswdUsers::new`].
#[derive(Debug)]
pub struct HtpasswdUsers<'a, C: ClusterClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ClusterClient + ?Sized> HtpasswdUsers<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Lists htpasswd users matching `filter`, or all users when `filter` is `None`.
    ///
    /// # Errors
    /// Returns `Error::Request` on transport failure and `Error::Deserialization` if a
    /// success body is not an array of users.
    #[instrument(skip(self, filter))]
    pub async fn list(
        &self,
        filter: Option<ListFilter>,
    ) -> Result<Response<Vec<HtpasswdUser>>, Error> {
        let filter = filter.unwrap_or_default();
        let request = Request::new(
            Method::GET,
            format!("{}?{}", RESOURCE_PATH, filter.to_query()),
        );

        let response = self.client.request(request).await?;
        if !response.is_success() {
            warn!(status = %response.status(), "Listing htpasswd users failed");
            return Ok(response.without_data());
        }

        let users: Vec<HtpasswdUser> = serde_json::from_value(response.body().clone())?;
        debug!(count = users.len(), "Listed htpasswd users");

        Ok(response.with_data(users))
    }

    /// Fetches a single htpasswd user.
    ///
    /// # Errors
    /// Returns `Error::Request` on transport failure and `Error::Deserialization` if a
    /// success body is not a user.
    #[instrument(skip(self))]
    pub async fn get(&self, id: u64) -> Result<Response<HtpasswdUser>, Error> {
        let request = Request::new(Method::GET, format!("{}/{}", RESOURCE_PATH, id));

        let response = self.client.request(request).await?;
        if !response.is_success() {
            warn!(status = %response.status(), "Fetching htpasswd user failed");
            return Ok(response.without_data());
        }

        map_user(response)
    }

    /// Creates an htpasswd user from its username, password and htpasswd file.
    ///
    /// The cluster the server assigns is recorded as affected.
    ///
    /// # Errors
    /// Returns `Error::Validation` without sending anything if `username`, `password` or
    /// `htpasswd_file_id` is missing.
    #[instrument(skip(self, user), fields(username = ?user.username))]
    pub async fn create(&self, user: &HtpasswdUser) -> Result<Response<HtpasswdUser>, Error> {
        let payload = CreateHtpasswdUserPayload::try_from(user).map_err(|e| {
            error!(error = %e, "Refusing to create htpasswd user");
            e
        })?;

        let request = Request::new(Method::POST, RESOURCE_PATH).with_body(&payload)?;

        let response = self.client.request(request).await?;
        if !response.is_success() {
            warn!(status = %response.status(), "Creating htpasswd user failed");
            return Ok(response.without_data());
        }

        let response = map_user(response)?;
        if let Some(created) = response.data() {
            info!(id = ?created.id, "Created htpasswd user");
            self.report_affected_cluster(created);
        }

        Ok(response)
    }

    /// Replaces an existing htpasswd user.
    ///
    /// # Errors
    /// Returns `Error::Validation` without sending anything if `username`, `password`,
    /// `htpasswd_file_id`, `id` or `cluster_id` is missing.
    #[instrument(skip(self, user), fields(id = ?user.id))]
    pub async fn update(&self, user: &HtpasswdUser) -> Result<Response<HtpasswdUser>, Error> {
        let payload = UpdateHtpasswdUserPayload::try_from(user).map_err(|e| {
            error!(error = %e, "Refusing to update htpasswd user");
            e
        })?;

        let request = Request::new(
            Method::PUT,
            format!("{}/{}", RESOURCE_PATH, payload.id),
        )
        .with_body(&payload)?;

        let response = self.client.request(request).await?;
        if !response.is_success() {
            warn!(status = %response.status(), "Updating htpasswd user failed");
            return Ok(response.without_data());
        }

        let response = map_user(response)?;
        if let Some(updated) = response.data() {
            info!("Updated htpasswd user");
            self.report_affected_cluster(updated);
        }

        Ok(response)
    }

    /// Deletes an htpasswd user.
    ///
    /// The user is fetched first so its cluster can be recorded as affected; the
    /// delete is sent even when that lookup fails. The delete response is returned
    /// as-is.
    ///
    /// # Errors
    /// Returns `Error::Request` if either call cannot be sent.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<Response, Error> {
        let lookup = self.get(id).await?;
        match lookup.data() {
            Some(existing) => self.report_affected_cluster(existing),
            None => warn!(
                status = %lookup.status(),
                "Could not look up htpasswd user before deleting, affected cluster unknown"
            ),
        }

        let request = Request::new(Method::DELETE, format!("{}/{}", RESOURCE_PATH, id));
        let response = self.client.request(request).await?;

        if response.is_success() {
            info!("Deleted htpasswd user");
        } else {
            warn!(status = %response.status(), "Deleting htpasswd user failed");
        }

        Ok(response)
    }

    fn report_affected_cluster(&self, user: &HtpasswdUser) {
        match user.cluster_id {
            Some(cluster_id) => {
                debug!(cluster_id, "Recording affected cluster");
                self.client.add_affected_cluster(cluster_id);
            }
            None => warn!(id = ?user.id, "Htpasswd user has no cluster_id to record"),
        }
    }
}

fn map_user(response: Response) -> Result<Response<HtpasswdUser>, Error> {
    let user: HtpasswdUser = serde_json::from_value(response.body().clone())?;
    Ok(response.with_data(user))
}
