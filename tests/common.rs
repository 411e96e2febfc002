// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Scripted in-memory transport, record fixtures and client construction helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `whoopy`
//!
//! The scripted transport answers requests from a queue and records every
//! request it sees, so tests can assert on call counts and query parameters
//! without a network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use whoopy::client::WhoopClient;
use whoopy::config::{ClientOptions, WhoopConfig};
use whoopy::errors::{WhoopError, WhoopResult};
use whoopy::oauth2_client::TokenInfo;
use whoopy::retry::RetryConfig;
use whoopy::transport::{HttpRequest, HttpResponse, HttpTransport, TransportFactory};

/// Transport replaying queued responses in order
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<HttpResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn push(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests whose URL ends with `suffix`
    pub fn requests_to(&self, suffix: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.url.ends_with(suffix))
            .collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> WhoopResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| WhoopError::transport("no scripted response left"))
    }
}

/// Factory handing out the same scripted transport to every session
pub struct ScriptedFactory(pub Arc<ScriptedTransport>);

impl TransportFactory for ScriptedFactory {
    fn create(&self, _options: &ClientOptions) -> WhoopResult<Arc<dyn HttpTransport>> {
        let transport: Arc<dyn HttpTransport> = self.0.clone();
        Ok(transport)
    }
}

pub fn json_response(status: u16, body: &Value) -> HttpResponse {
    HttpResponse::new(status, body.to_string()).with_header("Content-Type", "application/json")
}

pub fn page_response(records: &[Value], next_token: Option<&str>) -> HttpResponse {
    json_response(200, &json!({ "records": records, "next_token": next_token }))
}

pub fn token_response(access_token: &str, refresh_token: Option<&str>) -> HttpResponse {
    json_response(
        200,
        &json!({
            "access_token": access_token,
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": refresh_token,
            "scope": "offline read:cycles read:recovery",
        }),
    )
}

pub fn cycle_json(id: i64) -> Value {
    json!({
        "id": id,
        "user_id": 10129,
        "created_at": "2025-01-14T11:25:44.774Z",
        "updated_at": "2025-01-14T14:25:44.774Z",
        "start": "2025-01-13T02:25:44.774Z",
        "end": "2025-01-14T02:25:44.774Z",
        "timezone_offset": "-05:00",
        "score_state": "SCORED",
        "score": {
            "strain": 5.2951527,
            "kilojoule": 8288.297,
            "average_heart_rate": 68,
            "max_heart_rate": 141
        }
    })
}

pub fn workout_json(id: &str, sport: &str) -> Value {
    json!({
        "id": id,
        "user_id": 9012,
        "created_at": "2025-01-14T11:25:44.774Z",
        "updated_at": "2025-01-14T14:25:44.774Z",
        "start": "2025-01-14T02:25:44.774Z",
        "end": "2025-01-14T03:25:44.774Z",
        "timezone_offset": "-05:00",
        "sport_name": sport,
        "score_state": "PENDING_SCORE"
    })
}

pub fn test_config() -> WhoopConfig {
    WhoopConfig::new("test-client", "test-secret", "http://localhost:1234")
}

/// Options pointed at a fake host with retries off
pub fn test_options() -> ClientOptions {
    ClientOptions::default()
        .with_base_url("https://whoop.test")
        .with_retry(RetryConfig::disabled())
}

/// Token that expires in an hour and can be refreshed
pub fn fresh_token(access_token: &str) -> TokenInfo {
    TokenInfo::new(
        access_token,
        3600,
        Some("refresh-1".to_owned()),
        vec!["offline".to_owned(), "read:cycles".to_owned()],
    )
}

/// Client with credentials and a fresh token over `transport`
pub fn scripted_client(transport: &Arc<ScriptedTransport>, options: ClientOptions) -> WhoopClient {
    WhoopClient::builder()
        .config(test_config())
        .token(fresh_token("access-1"))
        .options(options)
        .transport_factory(Arc::new(ScriptedFactory(Arc::clone(transport))))
        .build()
        .unwrap()
}
