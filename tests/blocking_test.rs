// ABOUTME: Tests for the blocking client facade
// ABOUTME: Runtime reentrancy guard, materialized iteration and token sharing across calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use whoopy::blocking::BlockingWhoopClient;
use whoopy::errors::ErrorCategory;
use whoopy::retry::{JitterSource, RetryConfig};
use whoopy::transport::HttpResponse;
use whoopy::ListParams;

use common::{
    cycle_json, fresh_token, json_response, page_response, test_config, test_options,
    token_response, workout_json, ScriptedFactory, ScriptedTransport,
};

fn blocking_client(transport: &Arc<ScriptedTransport>) -> BlockingWhoopClient {
    BlockingWhoopClient::builder()
        .config(test_config())
        .token(fresh_token("access-1"))
        .options(test_options())
        .transport_factory(Arc::new(ScriptedFactory(Arc::clone(transport))))
        .build_blocking()
}

#[tokio::test]
async fn test_blocking_call_inside_runtime_is_rejected() {
    let transport = ScriptedTransport::new(vec![page_response(&[], None)]);
    let client = blocking_client(&transport);

    let err = client.cycles().get_all(ListParams::new()).unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_blocking_get_all_collects_pages() {
    let transport = ScriptedTransport::new(vec![
        page_response(&[cycle_json(1), cycle_json(2)], Some("next")),
        page_response(&[cycle_json(3)], None),
    ]);
    let client = blocking_client(&transport);

    let cycles = client.cycles().get_all(ListParams::new()).unwrap();

    assert_eq!(
        cycles.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn test_blocking_iterate_is_materialized_in_order() {
    let transport = ScriptedTransport::new(vec![
        page_response(&[workout_json("a", "running")], Some("t1")),
        page_response(&[workout_json("b", "cycling")], Some("t2")),
        page_response(&[workout_json("c", "Running")], None),
    ]);
    let client = blocking_client(&transport);

    let workouts = client.workouts().iterate(ListParams::new()).unwrap();

    let ids: Vec<&str> = workouts.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_blocking_sport_filter_ignores_case() {
    let transport = ScriptedTransport::new(vec![page_response(
        &[
            workout_json("a", "running"),
            workout_json("b", "cycling"),
            workout_json("c", "Running"),
        ],
        None,
    )]);
    let client = blocking_client(&transport);

    let runs = client
        .workouts()
        .get_by_sport("RUNNING", ListParams::new())
        .unwrap();

    assert_eq!(runs.len(), 2);
}

#[test]
fn test_refreshed_token_carries_over_to_next_call() {
    let transport = ScriptedTransport::new(vec![
        HttpResponse::new(401, ""),
        token_response("access-2", Some("refresh-2")),
        json_response(200, &cycle_json(1)),
        json_response(200, &cycle_json(2)),
    ]);
    let client = blocking_client(&transport);

    client.cycles().get_by_id(1).unwrap();
    client.cycles().get_by_id(2).unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[3].header("authorization"), Some("bearer access-2"));
    assert_eq!(client.token_info().unwrap().access_token, "access-2");
}

#[test]
fn test_blocking_save_token_writes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("token.json");
    let transport = ScriptedTransport::new(Vec::new());
    let client = blocking_client(&transport);

    client.save_token(&path).unwrap();

    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"client_id": "id", "client_secret": "secret"}"#).unwrap();
    let reloaded = BlockingWhoopClient::from_config(&config, &path).unwrap();

    assert_eq!(reloaded.token_info().unwrap().access_token, "access-1");
    assert_eq!(reloaded.config().unwrap().redirect_uri, "http://localhost:1234");
}

#[test]
fn test_blocking_from_config_missing_file_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let result = BlockingWhoopClient::from_config(
        dir.path().join("missing.json"),
        dir.path().join("token.json"),
    );

    let Err(err) = result else {
        panic!("missing config must fail");
    };
    assert_eq!(err.category(), ErrorCategory::Configuration);
    assert!(err.to_string().contains("client_id"));
}

struct CountingJitter(Arc<AtomicUsize>);

impl JitterSource for CountingJitter {
    fn sample(&mut self, low: f64, _high: f64) -> f64 {
        self.0.fetch_add(1, Ordering::SeqCst);
        low
    }
}

#[test]
fn test_blocking_sessions_use_configured_jitter_source() {
    let samples = Arc::new(AtomicUsize::new(0));
    let transport = ScriptedTransport::new(vec![
        HttpResponse::new(503, "unavailable"),
        json_response(200, &cycle_json(1)),
        HttpResponse::new(502, "bad gateway"),
        json_response(200, &cycle_json(2)),
    ]);
    let retry = RetryConfig::default()
        .with_max_attempts(2)
        .with_base_delay(Duration::from_millis(1));
    let client = BlockingWhoopClient::builder()
        .config(test_config())
        .token(fresh_token("access-1"))
        .options(test_options().with_retry(retry))
        .transport_factory(Arc::new(ScriptedFactory(Arc::clone(&transport))))
        .jitter_source(Box::new(CountingJitter(Arc::clone(&samples))))
        .build_blocking();

    client.cycles().get_by_id(1).unwrap();
    client.cycles().get_by_id(2).unwrap();

    assert_eq!(samples.load(Ordering::SeqCst), 2);
    assert_eq!(transport.request_count(), 4);
}
