// ABOUTME: Tests for token expiry, persistence and the token manager
// ABOUTME: Save/load round trips, missing files, lifecycle states and single-flight refresh
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::fs;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tempfile::TempDir;
use whoopy::config::ClientOptions;
use whoopy::errors::ErrorCategory;
use whoopy::oauth2_client::{OAuth2Client, OAuth2Config, TokenInfo, TokenManager, TokenState};
use whoopy::transport::HttpTransport;

use common::{test_config, token_response, ScriptedTransport};

fn scopes() -> Vec<String> {
    vec!["offline".to_owned(), "read:sleep".to_owned()]
}

#[test]
fn test_token_in_the_past_is_expired() {
    let issued = Utc::now() - Duration::hours(2);
    let token = TokenInfo::issued_at("a", issued, 3600, None, scopes());
    assert!(token.is_expired());
    assert_eq!(token.state_at(Utc::now()), TokenState::Expired);
}

#[test]
fn test_token_far_in_the_future_is_valid() {
    let token = TokenInfo::new("a", 86_400, None, scopes());
    assert!(!token.is_expired());
    assert_eq!(token.state_at(Utc::now()), TokenState::Valid);
    assert_eq!(
        token.expires_at(),
        Some(token.created_at + Duration::seconds(86_400))
    );
}

#[test]
fn test_authorization_header_uses_token_type() {
    let token = TokenInfo::new("abc", 3600, None, scopes());
    assert_eq!(token.authorization_header(), "Bearer abc");
}

#[test]
fn test_save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("token.json");
    let token = TokenInfo::new("access", 3600, Some("refresh".to_owned()), scopes());

    token.save(&path).unwrap();
    let loaded = TokenInfo::load(&path).unwrap();

    assert_eq!(loaded, token);
}

#[test]
fn test_load_missing_file_is_none() {
    let dir = TempDir::new().unwrap();
    assert!(TokenInfo::load(dir.path().join("absent.json")).is_none());
    assert_eq!(
        TokenManager::load(dir.path().join("absent.json")).state(),
        TokenState::NoToken
    );
}

#[test]
fn test_unrepresentable_lifetime_counts_as_expired() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token.json");
    fs::write(
        &path,
        r#"{"access_token": "a", "created_at": "2025-01-01T00:00:00Z", "expires_in": 9223372036854775807, "refresh_token": "r"}"#,
    )
    .unwrap();

    let token = TokenInfo::load(&path).unwrap();

    assert_eq!(token.expires_at(), None);
    assert!(token.is_expired());
    assert_eq!(token.state_at(Utc::now()), TokenState::Expired);

    let negative = TokenInfo::issued_at("a", Utc::now(), i64::MIN, None, scopes());
    assert_eq!(negative.expires_at(), None);
    assert!(negative.is_expired());
}

#[test]
fn test_load_corrupt_file_is_none() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token.json");
    fs::write(&path, "{not json").unwrap();
    assert!(TokenInfo::load(&path).is_none());
}

#[test]
fn test_load_fills_defaults_for_minimal_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token.json");
    fs::write(&path, r#"{"access_token": "abc", "expires_in": 3600}"#).unwrap();

    let token = TokenInfo::load(&path).unwrap();
    assert_eq!(token.token_type, "Bearer");
    assert!(token.refresh_token.is_none());
    assert!(token.scopes.is_empty());
}

#[test]
fn test_manager_save_without_token_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let err = TokenManager::new(None)
        .save(dir.path().join("token.json"))
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn test_manager_set_replaces_token_wholesale() {
    let manager = TokenManager::new(Some(TokenInfo::new("old", 3600, None, scopes())));
    let before = manager.current().unwrap();
    manager.set(TokenInfo::new("new", 3600, None, scopes()));

    assert_eq!(before.access_token, "old");
    assert_eq!(manager.current().unwrap().access_token, "new");
    manager.clear();
    assert_eq!(manager.state(), TokenState::NoToken);
}

fn oauth_client(transport: &Arc<ScriptedTransport>) -> OAuth2Client {
    let options = ClientOptions::default().with_base_url("https://whoop.test");
    let transport: Arc<dyn HttpTransport> = transport.clone();
    OAuth2Client::new(OAuth2Config::new(test_config(), &options), transport)
}

#[tokio::test]
async fn test_concurrent_refreshes_share_one_exchange() {
    let transport = ScriptedTransport::new(vec![token_response("access-2", Some("refresh-2"))]);
    let oauth = oauth_client(&transport);
    let manager = TokenManager::new(Some(TokenInfo::new(
        "access-1",
        3600,
        Some("refresh-1".to_owned()),
        scopes(),
    )));
    let stale = manager.current().unwrap();

    let (first, second) = tokio::join!(
        manager.refresh(&oauth, Some(&stale)),
        manager.refresh(&oauth, Some(&stale)),
    );

    assert_eq!(first.unwrap().access_token, "access-2");
    assert_eq!(second.unwrap().access_token, "access-2");
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_failed_refresh_keeps_current_token() {
    let transport = ScriptedTransport::new(vec![common::json_response(
        400,
        &serde_json::json!({"error": "invalid_grant"}),
    )]);
    let oauth = oauth_client(&transport);
    let manager = TokenManager::new(Some(TokenInfo::new(
        "access-1",
        3600,
        Some("refresh-1".to_owned()),
        scopes(),
    )));
    let stale = manager.current().unwrap();

    let err = manager.refresh(&oauth, Some(&stale)).await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::RefreshToken);
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(manager.current().unwrap().access_token, "access-1");
}

#[tokio::test]
async fn test_refresh_without_refresh_token_fails_without_network() {
    let transport = ScriptedTransport::new(Vec::new());
    let oauth = oauth_client(&transport);
    let manager = TokenManager::new(Some(TokenInfo::new("access-1", 3600, None, scopes())));

    let err = manager.refresh(&oauth, None).await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::RefreshToken);
    assert_eq!(transport.request_count(), 0);
}
