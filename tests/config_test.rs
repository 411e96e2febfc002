// ABOUTME: Tests for credential loading and environment-driven retry settings
// ABOUTME: Environment tests are serialized because they mutate process state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::fs;
use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;
use whoopy::config::{ClientOptions, WhoopConfig};
use whoopy::errors::ErrorCategory;
use whoopy::retry::RetryConfig;

const ENV_KEYS: &[&str] = &[
    "WHOOP_CLIENT_ID",
    "WHOOP_CLIENT_SECRET",
    "WHOOP_REDIRECT_URI",
    "WHOOP_RETRY_MAX_ATTEMPTS",
    "WHOOP_RETRY_BASE_DELAY_MS",
    "WHOOP_RETRY_MAX_DELAY_MS",
];

fn clear_env() {
    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

#[test]
fn test_flat_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"client_id": "abc", "client_secret": "xyz", "redirect_uri": "http://localhost:8080/cb"}"#,
    )
    .unwrap();

    let config = WhoopConfig::from_file(&path).unwrap();

    assert_eq!(config, WhoopConfig::new("abc", "xyz", "http://localhost:8080/cb"));
}

#[test]
fn test_nested_whoop_section() {
    let config = WhoopConfig::from_json_str(
        r#"{"whoop": {"client_id": "abc", "client_secret": "xyz"}, "other": 1}"#,
    )
    .unwrap();

    assert_eq!(config.client_id, "abc");
    assert_eq!(config.redirect_uri, "http://localhost:1234");
}

#[test]
fn test_missing_file_explains_expected_layout() {
    let dir = TempDir::new().unwrap();
    let err = WhoopConfig::from_file(dir.path().join("nope.json")).unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Configuration);
    let message = err.to_string();
    assert!(message.contains("nope.json"));
    assert!(message.contains("client_secret"));
}

#[test]
fn test_missing_secret_is_rejected() {
    let err = WhoopConfig::from_json_str(r#"{"client_id": "abc"}"#).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);

    let err = WhoopConfig::from_json_str(r#"{"client_id": "abc", "client_secret": "  "}"#)
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn test_invalid_json_is_configuration_error() {
    let err = WhoopConfig::from_json_str("client_id=abc").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn test_debug_redacts_secret() {
    let config = WhoopConfig::new("abc", "super-secret", "http://localhost:1234");
    let rendered = format!("{config:?}");

    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("abc"));
}

#[test]
#[serial]
fn test_credentials_from_env() {
    clear_env();
    env::set_var("WHOOP_CLIENT_ID", "env-id");
    env::set_var("WHOOP_CLIENT_SECRET", "env-secret");

    let config = WhoopConfig::from_env().unwrap();

    assert_eq!(config.client_id, "env-id");
    assert_eq!(config.client_secret, "env-secret");
    assert_eq!(config.redirect_uri, "http://localhost:1234");
    clear_env();
}

#[test]
#[serial]
fn test_credentials_from_env_require_secret() {
    clear_env();
    env::set_var("WHOOP_CLIENT_ID", "env-id");

    let err = WhoopConfig::from_env().unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Configuration);
    clear_env();
}

#[test]
#[serial]
fn test_retry_config_from_env() {
    clear_env();
    env::set_var("WHOOP_RETRY_MAX_ATTEMPTS", "5");
    env::set_var("WHOOP_RETRY_BASE_DELAY_MS", "250");
    env::set_var("WHOOP_RETRY_MAX_DELAY_MS", "not-a-number");

    let config = RetryConfig::from_env();

    assert_eq!(config.max_attempts, 5);
    assert_eq!(config.base_delay, Duration::from_millis(250));
    assert_eq!(config.max_delay, RetryConfig::default().max_delay);
    clear_env();
}

#[test]
#[serial]
fn test_retry_attempts_never_below_one() {
    clear_env();
    env::set_var("WHOOP_RETRY_MAX_ATTEMPTS", "0");

    assert_eq!(RetryConfig::from_env().max_attempts, 1);
    clear_env();
}

#[test]
fn test_options_base_url_override() {
    let options = ClientOptions::default().with_base_url("http://127.0.0.1:4000/");

    assert_eq!(options.auth_url, "http://127.0.0.1:4000/oauth/oauth2/auth");
    assert_eq!(
        options.api_url("user/profile/basic"),
        "http://127.0.0.1:4000/developer/v2/user/profile/basic"
    );
}
