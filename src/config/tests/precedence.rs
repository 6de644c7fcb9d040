//! Tests for configuration layer precedence.

use rstest::rstest;
use serde_json::{Value, json};

use super::helpers::build_config_from_layers;

#[rstest]
#[case::file_overrides_defaults(
    vec![("defaults", json!({"test_id": "default-test"})), ("file", json!({"test_id": "file-test"}))],
    "test_id",
    "file-test",
    "file should override default"
)]
#[case::environment_overrides_file(
    vec![("file", json!({"token": "file-token"})), ("environment", json!({"token": "env-token"}))],
    "token",
    "env-token",
    "environment should override file"
)]
#[case::cli_overrides_environment(
    vec![("environment", json!({"api_url": "http://env/"})), ("cli", json!({"api_url": "http://cli/"}))],
    "api_url",
    "http://cli/",
    "CLI should override environment"
)]
#[case::project_defaults_file_env_cli(
    vec![
        ("defaults", json!({"project": "default-project"})),
        ("file", json!({"project": "file-project"})),
        ("environment", json!({"project": "env-project"})),
        ("cli", json!({"project": "cli-project"}))
    ],
    "project",
    "cli-project",
    "CLI should win for project"
)]
fn layer_precedence(
    #[case] layers: Vec<(&str, Value)>,
    #[case] field: &str,
    #[case] expected: &str,
    #[case] message: &str,
) {
    let config = build_config_from_layers(&layers);

    let actual = match field {
        "test_id" => config.test_id.as_deref(),
        "token" => config.token.as_deref(),
        "api_url" => config.api_url.as_deref(),
        "project" => config.project.as_deref(),
        _ => panic!("unknown field: {field}"),
    };

    assert_eq!(actual, Some(expected), "{message}");
}

#[rstest]
fn defaults_apply_when_no_sources_provided() {
    let config = build_config_from_layers(&[("defaults", json!({}))]);

    assert!(config.api_url.is_none(), "api_url should be None");
    assert!(config.test_id.is_none(), "test_id should be None");
    assert!(config.log_file.is_none(), "log_file should be None");
    assert_eq!(
        config.request_timeout_seconds, 20,
        "request timeout should default to 20 seconds"
    );
    assert_eq!(config.log_filter, "info", "log filter should default to info");
}

#[rstest]
fn partial_overrides_preserve_lower_values() {
    let config = build_config_from_layers(&[
        ("file", json!({"test_id": "login", "request_timeout_seconds": 5})),
        ("cli", json!({"test_id": "checkout"})),
    ]);

    assert_eq!(config.test_id.as_deref(), Some("checkout"));
    assert_eq!(config.request_timeout_seconds, 5);
}
