use clap::Subcommand;
use cluster_api_client::{ClusterApiClient, HtpasswdUser, ListFilter, Response, SortOrder};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::{get_config_path, AppConfig};
use crate::errors::Error;

#[cfg(test)]
#[path = "htpasswd_users_cmd_tests.rs"]
mod tests;

/// Subcommands for the htpasswd-users command
#[derive(Subcommand, Debug)]
pub enum HtpasswdUserCommands {
    /// List htpasswd users
    List {
        /// Number of records to skip
        #[arg(long)]
        skip: Option<u64>,

        /// Maximum number of records to return
        #[arg(long)]
        limit: Option<u64>,

        /// Only return records where FIELD equals VALUE (repeatable)
        #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_filter)]
        filters: Vec<(String, String)>,

        /// Sort by FIELD in the given order (repeatable)
        #[arg(long = "sort", value_name = "FIELD:asc|desc", value_parser = parse_sort)]
        sorts: Vec<(String, SortOrder)>,
    },

    /// Show a single htpasswd user
    Get {
        /// ID of the htpasswd user
        id: u64,
    },

    /// Create an htpasswd user
    Create {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        /// ID of the htpasswd file the user is added to
        #[arg(long)]
        htpasswd_file_id: u64,
    },

    /// Replace an existing htpasswd user
    Update {
        #[arg(long)]
        id: u64,

        #[arg(long)]
        cluster_id: u64,

        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        htpasswd_file_id: u64,
    },

    /// Delete an htpasswd user
    Delete {
        /// ID of the htpasswd user
        id: u64,
    },
}

/// What a command produced, ready to be printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the API accepted the request
    pub success: bool,

    /// Pretty JSON on success, a status line otherwise
    pub message: String,

    /// Clusters changed by the command
    pub affected_clusters: Vec<u64>,
}

/// Parses `FIELD=VALUE` for `--filter`.
pub fn parse_filter(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid FIELD=VALUE: no `=` found in `{}`", s))?;
    let field = &s[..pos];
    if field.is_empty() {
        return Err(format!("invalid FIELD=VALUE: empty field in `{}`", s));
    }
    Ok((field.to_string(), s[pos + 1..].to_string()))
}

/// Parses `FIELD:asc` / `FIELD:desc` for `--sort`. A bare `FIELD` sorts ascending.
pub fn parse_sort(s: &str) -> Result<(String, SortOrder), String> {
    let (field, order) = match s.split_once(':') {
        Some((field, order)) => (field, order.parse::<SortOrder>()?),
        None => (s, SortOrder::Ascending),
    };
    if field.is_empty() {
        return Err(format!("invalid sort `{}`: empty field", s));
    }
    Ok((field.to_string(), order))
}

/// Loads the configuration, builds a client and runs the command.
#[instrument(skip(cmd))]
pub async fn run(
    cmd: HtpasswdUserCommands,
    config_path: Option<&str>,
) -> Result<CommandOutput, Error> {
    let path = get_config_path(config_path);
    let config = AppConfig::load_with_env(&path)?;
    let client = ClusterApiClient::new(config.client)?;

    execute(cmd, &client).await
}

/// Runs the command against an existing client.
#[instrument(skip(cmd, client))]
pub async fn execute(
    cmd: HtpasswdUserCommands,
    client: &ClusterApiClient,
) -> Result<CommandOutput, Error> {
    let endpoint = client.htpasswd_users();

    let output = match cmd {
        HtpasswdUserCommands::List {
            skip,
            limit,
            filters,
            sorts,
        } => {
            let mut filter = ListFilter::new();
            if let Some(skip) = skip {
                filter = filter.skip(skip);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }
            for (field, value) in filters {
                filter = filter.filter(field, value);
            }
            for (field, order) in sorts {
                filter = filter.sort(field, order);
            }

            let response = endpoint.list(Some(filter)).await?;
            render(&response, |users: &Vec<HtpasswdUser>| {
                users.iter().map(HtpasswdUser::without_password).collect::<Vec<_>>()
            })?
        }
        HtpasswdUserCommands::Get { id } => {
            let response = endpoint.get(id).await?;
            render(&response, HtpasswdUser::without_password)?
        }
        HtpasswdUserCommands::Create {
            username,
            password,
            htpasswd_file_id,
        } => {
            let user = HtpasswdUser::new(username, password, htpasswd_file_id);
            let response = endpoint.create(&user).await?;
            render(&response, HtpasswdUser::without_password)?
        }
        HtpasswdUserCommands::Update {
            id,
            cluster_id,
            username,
            password,
            htpasswd_file_id,
        } => {
            let user = HtpasswdUser {
                id: Some(id),
                cluster_id: Some(cluster_id),
                ..HtpasswdUser::new(username, password, htpasswd_file_id)
            };
            let response = endpoint.update(&user).await?;
            render(&response, HtpasswdUser::without_password)?
        }
        HtpasswdUserCommands::Delete { id } => {
            let response = endpoint.delete(id).await?;
            if response.is_success() {
                (true, format!("Deleted htpasswd user {}", id))
            } else {
                (false, describe_failure(&response))
            }
        }
    };

    let (success, message) = output;
    let affected_clusters = client.affected_clusters();
    debug!(success, affected = ?affected_clusters, "Command finished");

    Ok(CommandOutput {
        success,
        message,
        affected_clusters,
    })
}

fn render<T, U, F>(response: &Response<T>, view: F) -> Result<(bool, String), Error>
where
    U: Serialize,
    F: FnOnce(&T) -> U,
{
    match response.data() {
        Some(data) if response.is_success() => {
            Ok((true, serde_json::to_string_pretty(&view(data))?))
        }
        _ => Ok((false, describe_failure(response))),
    }
}

fn describe_failure<T>(response: &Response<T>) -> String {
    let reason = response.status_message().unwrap_or("Unknown status");
    match response.error_detail() {
        Some(detail) => format!(
            "Request failed with status {} {}: {}",
            response.status().as_u16(),
            reason,
            detail
        ),
        None => format!(
            "Request failed with status {} {}",
            response.status().as_u16(),
            reason
        ),
    }
}
