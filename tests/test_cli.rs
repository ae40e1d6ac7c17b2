use cloudnotes::application::FailurePolicy;
use cloudnotes::cli::args::{Args, Command};
use cloudnotes::infrastructure::config::{ApiBackend, StorageBackend};
use cloudnotes::resolve_config;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn given_no_subcommand_when_parsing_then_fails() {
    // Arrange
    let args = vec!["cloudnotes", "-v"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Should fail without subcommand");
}

#[test]
fn given_list_command_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["cloudnotes", "list", "--json"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::List { json } => assert!(json),
        _ => panic!("Expected List command"),
    }
    assert_eq!(parsed.config, None);
    assert_eq!(parsed.endpoint, None);
}

#[test]
fn given_create_command_with_image_when_parsing_then_succeeds() {
    // Arrange
    let args = vec![
        "cloudnotes",
        "create",
        "c",
        "d3",
        "--image",
        "/tmp/pic.png",
    ];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Create {
            name,
            description,
            image,
        } => {
            assert_eq!(name, "c");
            assert_eq!(description, "d3");
            assert_eq!(image, Some(PathBuf::from("/tmp/pic.png")));
        }
        _ => panic!("Expected Create command"),
    }
}

#[test]
fn given_create_command_without_description_when_parsing_then_fails() {
    let args = vec!["cloudnotes", "create", "c"];

    let result = Args::try_parse_from(args);

    assert!(result.is_err(), "Description is required");
}

#[test]
fn given_delete_command_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["cloudnotes", "delete", "8f14e45f-ceea-467f"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Delete { note_id } => assert_eq!(note_id, "8f14e45f-ceea-467f"),
        _ => panic!("Expected Delete command"),
    }
}

#[test]
fn given_global_flags_after_subcommand_when_parsing_then_succeeds() {
    // Arrange - global flags work anywhere when marked as global
    let args = vec![
        "cloudnotes",
        "view",
        "-c",
        "/path/to/config.toml",
        "--on-failure",
        "notify",
        "-vv",
    ];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert!(matches!(parsed.command, Command::View));
    assert_eq!(parsed.config, Some(PathBuf::from("/path/to/config.toml")));
    assert_eq!(parsed.on_failure, Some(FailurePolicy::Notify));
    assert_eq!(parsed.verbose, 2);
}

#[test]
fn given_invalid_failure_policy_when_parsing_then_fails() {
    let args = vec!["cloudnotes", "list", "--on-failure", "retry"];

    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn given_store_and_endpoint_when_parsing_then_conflicts() {
    let args = vec![
        "cloudnotes",
        "--store",
        "/tmp/notes",
        "--endpoint",
        "https://api.test/graphql",
        "list",
    ];

    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn given_endpoint_flag_when_resolving_config_then_uses_graphql_backend() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "[behavior]\non_failure = \"silent\"\n").unwrap();
    let args = Args::try_parse_from(vec![
        "cloudnotes",
        "-c",
        config_path.to_str().unwrap(),
        "--endpoint",
        "https://api.test/graphql",
        "--on-failure",
        "notify",
        "list",
    ])
    .unwrap();

    // Act
    let config = resolve_config(&args).unwrap();

    // Assert
    assert_eq!(config.api.backend, ApiBackend::Graphql);
    assert_eq!(config.api.endpoint, "https://api.test/graphql");
    assert_eq!(config.behavior.on_failure, FailurePolicy::Notify);
}

#[test]
fn given_store_flag_when_resolving_config_then_uses_local_backends() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "").unwrap();
    let args = Args::try_parse_from(vec![
        "cloudnotes",
        "-c",
        config_path.to_str().unwrap(),
        "--store",
        dir.path().to_str().unwrap(),
        "list",
    ])
    .unwrap();

    let config = resolve_config(&args).unwrap();

    assert_eq!(config.api.backend, ApiBackend::File);
    assert_eq!(config.storage.backend, StorageBackend::Fs);
    assert_eq!(
        PathBuf::from(&config.api.file),
        dir.path().join("notes.json")
    );
}

#[tokio::test]
async fn given_local_store_when_running_create_then_note_is_persisted() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "").unwrap();
    let store = dir.path().join("store");
    let args = Args::try_parse_from(vec![
        "cloudnotes",
        "-c",
        config_path.to_str().unwrap(),
        "--store",
        store.to_str().unwrap(),
        "create",
        "c",
        "d3",
    ])
    .unwrap();

    // Act
    cloudnotes::run(args).await.unwrap();

    // Assert
    let persisted = std::fs::read_to_string(store.join("notes.json")).unwrap();
    assert!(persisted.contains(r#""name": "c""#));
}

#[tokio::test]
async fn given_unknown_id_when_running_delete_then_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "").unwrap();
    let args = Args::try_parse_from(vec![
        "cloudnotes",
        "-c",
        config_path.to_str().unwrap(),
        "--store",
        dir.path().to_str().unwrap(),
        "delete",
        "missing",
    ])
    .unwrap();

    let result = cloudnotes::run(args).await;

    assert!(result.is_err());
}
