use super::*;
use clap::Parser;
use std::fs;
use tempfile::TempDir;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(subcommand)]
    command: ConfigCommands,
}

fn config_path(temp_dir: &TempDir) -> String {
    temp_dir
        .path()
        .join("cluster-api.toml")
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_init_creates_default_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = config_path(&temp_dir);

    let message =
        execute(ConfigCommands::Init { path: None }, Some(&path)).expect("Init should succeed");

    assert!(message.contains("Configuration initialized"));
    let loaded = AppConfig::load(std::path::Path::new(&path)).expect("Failed to load config");
    assert_eq!(loaded, AppConfig::default());
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = config_path(&temp_dir);
    fs::write(&path, "[client]\nbase_url = \"https://keep.example.com/\"\n").unwrap();

    let result = execute(ConfigCommands::Init { path: None }, Some(&path));

    match result {
        Err(Error::Config(msg)) => assert!(msg.contains("already exists")),
        other => panic!("Expected Config error, got {:?}", other),
    }
    assert!(fs::read_to_string(&path).unwrap().contains("keep.example.com"));
}

#[test]
fn test_validate_accepts_default_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = config_path(&temp_dir);
    execute(ConfigCommands::Init { path: None }, Some(&path)).unwrap();

    let message = execute(ConfigCommands::Validate, Some(&path)).expect("Config should be valid");

    assert_eq!(message, "Configuration is valid");
}

#[test]
fn test_validate_rejects_bad_base_url() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = config_path(&temp_dir);
    fs::write(&path, "[client]\nbase_url = \"not a url\"\n").unwrap();

    let result = execute(ConfigCommands::Validate, Some(&path));

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_set_then_get_value() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = config_path(&temp_dir);

    execute(
        ConfigCommands::Set {
            key: "client.timeout_seconds".to_string(),
            value: "12".to_string(),
        },
        Some(&path),
    )
    .expect("Set should succeed");

    let message = execute(
        ConfigCommands::Get {
            key: Some("client.timeout_seconds".to_string()),
        },
        Some(&path),
    )
    .expect("Get should succeed");

    assert_eq!(message, "client.timeout_seconds: 12");
}

#[test]
fn test_get_whole_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = config_path(&temp_dir);
    execute(ConfigCommands::Init { path: None }, Some(&path)).unwrap();

    let message = execute(ConfigCommands::Get { key: None }, Some(&path)).unwrap();

    assert!(message.contains("[client]"));
    assert!(message.contains("base_url"));
}

#[test]
fn test_set_rejects_non_numeric_timeout() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = config_path(&temp_dir);

    let result = execute(
        ConfigCommands::Set {
            key: "client.timeout_seconds".to_string(),
            value: "soon".to_string(),
        },
        Some(&path),
    );

    assert!(matches!(result, Err(Error::InvalidArguments(_))));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_unknown_key() {
    let config = AppConfig::default();

    assert!(matches!(
        get_config_value(&config, "client.password"),
        Err(Error::InvalidArguments(_))
    ));
    assert!(matches!(
        get_config_value(&config, "base_url"),
        Err(Error::InvalidArguments(_))
    ));
}

#[test]
fn test_init_parses_path_argument() {
    let cli = TestCli::try_parse_from(["cluster-api", "init", "--path", "/tmp/cluster-api.toml"])
        .expect("Arguments should parse");

    match cli.command {
        ConfigCommands::Init { path } => assert_eq!(path.as_deref(), Some("/tmp/cluster-api.toml")),
        other => panic!("Expected Init, got {:?}", other),
    }
}

#[test]
fn test_init_path_takes_precedence_over_config_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let fallback = config_path(&temp_dir);
    let explicit = temp_dir
        .path()
        .join("explicit.toml")
        .to_string_lossy()
        .into_owned();

    execute(
        ConfigCommands::Init {
            path: Some(explicit.clone()),
        },
        Some(&fallback),
    )
    .expect("Init should succeed");

    assert!(std::path::Path::new(&explicit).exists());
    assert!(!std::path::Path::new(&fallback).exists());
}
