// ABOUTME: Per-client runtime options such as endpoints, timeouts, retry policy and refresh behavior
// ABOUTME: Endpoints are overridable so tests can point the client at a local mock server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use crate::constants::api::{API_BASE, AUTH_URL, DEVELOPER_PREFIX, TOKEN_URL, USER_AGENT};
use crate::constants::network::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use crate::constants::oauth::DEFAULT_SCOPES;
use crate::retry::RetryConfig;

/// Options applied to every session of a client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    /// Root URL of the API, e.g. `https://api.prod.whoop.com/`
    pub api_base: String,
    /// OAuth2 authorization endpoint
    pub auth_url: String,
    /// OAuth2 token endpoint
    pub token_url: String,
    /// Scopes requested during authorization
    pub scopes: Vec<String>,
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Retry policy for transient failures
    pub retry: RetryConfig,
    /// Refresh and retry once when the API rejects the access token
    pub auto_refresh: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_owned(),
            auth_url: AUTH_URL.to_owned(),
            token_url: TOKEN_URL.to_owned(),
            scopes: DEFAULT_SCOPES.iter().map(|s| (*s).to_owned()).collect(),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_owned(),
            retry: RetryConfig::default(),
            auto_refresh: true,
        }
    }
}

impl ClientOptions {
    /// Point resource, authorization and token requests at `base`
    #[must_use]
    pub fn with_base_url(mut self, base: &str) -> Self {
        let root = base.trim_end_matches('/');
        self.api_base = format!("{root}/");
        self.auth_url = format!("{root}/oauth/oauth2/auth");
        self.token_url = format!("{root}/oauth/oauth2/token");
        self
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Enable or disable refresh-on-401
    #[must_use]
    pub const fn with_auto_refresh(mut self, auto_refresh: bool) -> Self {
        self.auto_refresh = auto_refresh;
        self
    }

    /// Replace the requested scopes
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Set request and connect timeouts
    #[must_use]
    pub const fn with_timeouts(mut self, request: Duration, connect: Duration) -> Self {
        self.request_timeout = request;
        self.connect_timeout = connect;
        self
    }

    /// Absolute URL for a resource path under the versioned prefix
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{DEVELOPER_PREFIX}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_joins_prefix() {
        let options = ClientOptions::default();
        assert_eq!(
            options.api_url("/cycle"),
            "https://api.prod.whoop.com/developer/v2/cycle"
        );
        let local = ClientOptions::default().with_base_url("http://127.0.0.1:9000");
        assert_eq!(
            local.api_url("activity/sleep"),
            "http://127.0.0.1:9000/developer/v2/activity/sleep"
        );
        assert_eq!(local.token_url, "http://127.0.0.1:9000/oauth/oauth2/token");
    }
}
