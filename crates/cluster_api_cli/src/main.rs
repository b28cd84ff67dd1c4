use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cluster_api_cli::commands::{
    config_cmd::{self, ConfigCommands},
    htpasswd_users_cmd::{self, CommandOutput, HtpasswdUserCommands},
};
use cluster_api_cli::errors::Error;

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// The API answered with a non-success status.
const EXIT_REFUSED: i32 = 1;

/// The command failed before or while talking to the API.
const EXIT_ERROR: i32 = 2;

/// Cluster API CLI: manage cluster resources from the command line
#[derive(Parser)]
#[command(name = "cluster-api")]
#[command(about = "Manage cluster API resources", long_about = None)]
struct Cli {
    /// Path to the configuration file (defaults to ./cluster-api.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Manage htpasswd users
    #[command(subcommand)]
    HtpasswdUsers(HtpasswdUserCommands),

    /// Show the CLI version
    Version,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("CLUSTER_API_LOG"))
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Config(cmd) => {
            let result = config_cmd::execute(cmd, cli.config.as_deref());
            if let Ok(message) = &result {
                println!("{message}");
            }
            report(&result);
            config_exit_code(&result)
        }
        Commands::HtpasswdUsers(cmd) => {
            let result = htpasswd_users_cmd::run(cmd, cli.config.as_deref()).await;
            if let Ok(output) = &result {
                println!("{}", output.message);
                if !output.affected_clusters.is_empty() {
                    eprintln!("Affected clusters: {:?}", output.affected_clusters);
                }
            }
            report(&result);
            htpasswd_users_exit_code(&result)
        }
        Commands::Version => {
            println!(
                "cluster-api version {}",
                option_env!("CLUSTER_API_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            0
        }
    };

    if code != 0 {
        std::process::exit(code);
    }
}

fn report<T>(result: &Result<T, Error>) {
    if let Err(e) = result {
        error!("Error: {e}");
        eprintln!("Error: {e}");
    }
}

/// Exit code for a `config` subcommand.
fn config_exit_code(result: &Result<String, Error>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => EXIT_ERROR,
    }
}

/// Exit code for an `htpasswd-users` subcommand: 0 when the API accepted the
/// request, [`EXIT_REFUSED`] when it answered with an error status.
fn htpasswd_users_exit_code(result: &Result<CommandOutput, Error>) -> i32 {
    match result {
        Ok(output) if output.success => 0,
        Ok(_) => EXIT_REFUSED,
        Err(_) => EXIT_ERROR,
    }
}
