use clap::Subcommand;
use tracing::{debug, error, info, instrument};

use crate::config::{get_config_path, AppConfig};
use crate::errors::Error;

#[cfg(test)]
#[path = "config_cmd_tests.rs"]
mod tests;

/// Subcommands for the config command
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Create initial configuration file
    Init {
        /// Path to save the configuration file (defaults to --config)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Check configuration syntax and settings
    Validate,

    /// Show current configuration
    Get {
        /// Configuration key to get (e.g., "client.base_url")
        key: Option<String>,
    },

    /// Update configuration values
    Set {
        /// Configuration key to set (e.g., "client.timeout_seconds")
        key: String,

        /// Value to set
        value: String,
    },
}

/// Execute the config command, returning the text to print.
#[instrument]
pub fn execute(cmd: ConfigCommands, path: Option<&str>) -> Result<String, Error> {
    match cmd {
        ConfigCommands::Init { path: init_path } => {
            init_config(init_path.as_deref().or(path))
        }
        ConfigCommands::Validate => validate_config(path),
        ConfigCommands::Get { key } => get_config(path, key.as_deref()),
        ConfigCommands::Set { key, value } => set_config(path, &key, &value),
    }
}

/// Initialize a new configuration file
#[instrument]
fn init_config(path: Option<&str>) -> Result<String, Error> {
    let config_path = get_config_path(path);
    debug!(message = "Initializing configuration", path = ?config_path);

    if config_path.exists() {
        let err = Error::Config(format!(
            "Configuration file already exists at {:?}",
            config_path
        ));
        error!(
            message = "Configuration file already exists",
            path = ?config_path,
            error = ?err
        );
        return Err(err);
    }

    AppConfig::default().save(&config_path)?;

    info!(message = "Configuration initialized", path = ?config_path);
    Ok(format!("Configuration initialized at {:?}", config_path))
}

/// Validate a configuration file, including the client settings it describes
#[instrument]
fn validate_config(path: Option<&str>) -> Result<String, Error> {
    let config_path = get_config_path(path);
    debug!(message = "Validating configuration", path = ?config_path);

    let config = AppConfig::load(&config_path)?;
    if let Err(e) = config.client.parsed_base_url() {
        error!(
            message = "Configuration is invalid",
            path = ?config_path,
            error = ?e
        );
        return Err(Error::Config(e.to_string()));
    }

    info!(message = "Configuration is valid", path = ?config_path);
    Ok("Configuration is valid".to_string())
}

/// Get a configuration value, or the whole file when no key is given
#[instrument]
fn get_config(path: Option<&str>, key: Option<&str>) -> Result<String, Error> {
    let config_path = get_config_path(path);
    debug!(message = "Getting configuration", path = ?config_path, key = ?key);

    let config = AppConfig::load(&config_path)?;

    match key {
        Some(key) => Ok(format!("{}: {}", key, get_config_value(&config, key)?)),
        None => toml::to_string_pretty(&config)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e))),
    }
}

/// Set a configuration value, creating the file if needed
#[instrument]
fn set_config(path: Option<&str>, key: &str, value: &str) -> Result<String, Error> {
    let config_path = get_config_path(path);
    debug!(
        message = "Setting configuration",
        path = ?config_path,
        key = key,
        value = value
    );

    let mut config = if config_path.exists() {
        AppConfig::load(&config_path)?
    } else {
        AppConfig::default()
    };

    if let Err(e) = set_config_value(&mut config, key, value) {
        error!(message = "Failed to set configuration value", key = key, value = value, error = ?e);
        return Err(e);
    }

    config.save(&config_path)?;

    info!(message = "Configuration updated", key = key, value = value);
    Ok(format!("Configuration updated: {} = {}", key, value))
}

fn invalid_key(key: &str) -> Error {
    Error::InvalidArguments(format!("Invalid configuration key: {}", key))
}

/// Get a value from the configuration by key path
fn get_config_value(config: &AppConfig, key: &str) -> Result<String, Error> {
    match key.split_once('.') {
        Some(("client", "base_url")) => Ok(config.client.base_url.clone()),
        Some(("client", "timeout_seconds")) => Ok(config.client.timeout_seconds.to_string()),
        Some(("client", "user_agent")) => Ok(config.client.user_agent.clone()),
        _ => Err(invalid_key(key)),
    }
}

/// Set a value in the configuration by key path
fn set_config_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), Error> {
    match key.split_once('.') {
        Some(("client", "base_url")) => config.client.base_url = value.to_string(),
        Some(("client", "timeout_seconds")) => {
            config.client.timeout_seconds = value.parse().map_err(|_| {
                Error::InvalidArguments(format!(
                    "client.timeout_seconds must be a whole number of seconds, got '{}'",
                    value
                ))
            })?;
        }
        Some(("client", "user_agent")) => config.client.user_agent = value.to_string(),
        _ => return Err(invalid_key(key)),
    }
    Ok(())
}
