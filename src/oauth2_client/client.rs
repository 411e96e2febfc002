// ABOUTME: OAuth2 authorization-code client for the WHOOP token endpoint
// ABOUTME: Builds authorization URLs, exchanges codes, refreshes tokens and parses redirects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument, warn};
use url::Url;
use uuid::Uuid;

use super::token::TokenInfo;
use crate::config::{ClientOptions, WhoopConfig};
use crate::constants::oauth::{
    DEFAULT_EXPIRES_IN, DEFAULT_TOKEN_TYPE, MIN_STATE_LENGTH, OFFLINE_SCOPE,
};
use crate::errors::{WhoopError, WhoopResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Settings needed to talk to the authorization server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuth2Config {
    /// Application credentials
    pub credentials: WhoopConfig,
    /// Authorization endpoint URL
    pub auth_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Scopes to request
    pub scopes: Vec<String>,
}

impl OAuth2Config {
    /// Combine credentials with the endpoints and scopes from `options`
    #[must_use]
    pub fn new(credentials: WhoopConfig, options: &ClientOptions) -> Self {
        Self {
            credentials,
            auth_url: options.auth_url.clone(),
            token_url: options.token_url.clone(),
            scopes: options.scopes.clone(),
        }
    }
}

/// OAuth 2.0 token response from WHOOP
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Space-separated list of granted scopes
    #[serde(default)]
    scope: Option<String>,
}

/// OAuth 2.0 client bound to one transport
pub struct OAuth2Client {
    config: OAuth2Config,
    transport: Arc<dyn HttpTransport>,
}

impl OAuth2Client {
    /// Create a client sending token requests through `transport`
    #[must_use]
    pub fn new(config: OAuth2Config, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Get the `OAuth2` configuration
    #[must_use]
    pub const fn config(&self) -> &OAuth2Config {
        &self.config
    }

    /// Get authorization URL
    ///
    /// A random state is generated when `state` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the state is shorter than eight characters or
    /// the authorization endpoint is not a valid URL
    pub fn authorization_url(&self, state: Option<&str>) -> WhoopResult<String> {
        let state = match state {
            Some(state) if state.chars().count() < MIN_STATE_LENGTH => {
                return Err(WhoopError::configuration(format!(
                    "state must be at least {MIN_STATE_LENGTH} characters"
                )));
            }
            Some(state) => state.to_owned(),
            None => Uuid::new_v4().simple().to_string(),
        };

        let mut url = Url::parse(&self.config.auth_url)
            .map_err(|e| WhoopError::configuration(format!("invalid auth URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.credentials.client_id)
            .append_pair("redirect_uri", &self.config.credentials.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.config.scopes.join(" "))
            .append_pair("state", &state);

        Ok(url.to_string())
    }

    /// Exchange authorization code for tokens
    ///
    /// # Errors
    ///
    /// Returns `Authentication` if the token endpoint rejects the code, or
    /// `Transport` / `Deserialization` for network and decoding failures
    #[instrument(skip(self, code), fields(api_call = "exchange_code"))]
    pub async fn exchange_code(&self, code: &str) -> WhoopResult<TokenInfo> {
        let credentials = &self.config.credentials;
        let params = vec![
            ("grant_type".to_owned(), "authorization_code".to_owned()),
            ("code".to_owned(), code.trim().to_owned()),
            ("client_id".to_owned(), credentials.client_id.clone()),
            ("client_secret".to_owned(), credentials.client_secret.clone()),
            ("redirect_uri".to_owned(), credentials.redirect_uri.clone()),
        ];

        let response = self.post_token_form(params).await?;
        if !response.is_success() {
            return Err(WhoopError::Authentication {
                message: "authorization code exchange was rejected".to_owned(),
                status_code: Some(response.status),
                body: non_empty(response.body),
            });
        }

        let parsed: TokenResponse = response.json("token response")?;
        let token = self.token_from_response(parsed, &self.config.scopes, None);
        info!(scopes = ?token.scopes, "authorization code exchanged");
        Ok(token)
    }

    /// Obtain a new access token from `refresh_token`
    ///
    /// `previous_scopes` is used when the server does not echo the granted scopes.
    ///
    /// # Errors
    ///
    /// Returns `RefreshToken` for any failure, including network errors
    #[instrument(skip_all, fields(api_call = "refresh_token"))]
    pub async fn refresh(
        &self,
        refresh_token: &str,
        previous_scopes: &[String],
    ) -> WhoopResult<TokenInfo> {
        let credentials = &self.config.credentials;
        let params = vec![
            ("grant_type".to_owned(), "refresh_token".to_owned()),
            ("refresh_token".to_owned(), refresh_token.to_owned()),
            ("client_id".to_owned(), credentials.client_id.clone()),
            ("client_secret".to_owned(), credentials.client_secret.clone()),
            ("scope".to_owned(), OFFLINE_SCOPE.to_owned()),
        ];

        let response = self
            .post_token_form(params)
            .await
            .map_err(|e| WhoopError::refresh(format!("failed to refresh token: {e}")))?;
        if !response.is_success() {
            warn!(status = response.status, "token refresh rejected");
            return Err(WhoopError::RefreshToken {
                message: "token endpoint rejected the refresh token".to_owned(),
                status_code: Some(response.status),
                body: non_empty(response.body),
            });
        }

        let parsed: TokenResponse = response
            .json("token response")
            .map_err(|e| WhoopError::refresh(format!("failed to refresh token: {e}")))?;
        Ok(self.token_from_response(parsed, previous_scopes, Some(refresh_token)))
    }

    async fn post_token_form(&self, params: Vec<(String, String)>) -> WhoopResult<HttpResponse> {
        let request = HttpRequest::post(&self.config.token_url)
            .with_header("Accept", "application/json")
            .with_form(params);
        self.transport.send(request).await
    }

    fn token_from_response(
        &self,
        response: TokenResponse,
        requested: &[String],
        previous_refresh: Option<&str>,
    ) -> TokenInfo {
        let scopes: Vec<String> = response.scope.as_deref().map_or_else(
            || requested.to_vec(),
            |granted| granted.split_whitespace().map(str::to_owned).collect(),
        );
        let missing: Vec<&str> = self
            .config
            .scopes
            .iter()
            .filter(|s| !scopes.contains(*s))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            warn!(?missing, "requested scopes were not granted");
        }

        TokenInfo {
            access_token: response.access_token,
            token_type: response
                .token_type
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_owned()),
            created_at: Utc::now(),
            expires_in: response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
            refresh_token: response
                .refresh_token
                .filter(|t| !t.is_empty())
                .or_else(|| previous_refresh.map(str::to_owned)),
            scopes,
        }
    }
}

/// Pull the authorization code out of a redirect URL pasted by the user
///
/// # Errors
///
/// Returns `Authentication` if the URL carries an `error` parameter or no `code`,
/// and `Configuration` if it cannot be parsed
pub fn extract_code(redirect_url: &str) -> WhoopResult<String> {
    let url = Url::parse(redirect_url.trim())
        .map_err(|e| WhoopError::configuration(format!("invalid redirect URL: {e}")))?;

    let mut code = None;
    let mut error = None;
    let mut description = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            "error_description" => description = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        let detail = description.map_or_else(String::new, |d| format!(": {d}"));
        return Err(WhoopError::authentication(format!(
            "authorization denied ({error}){detail}"
        )));
    }
    code.filter(|c| !c.is_empty())
        .ok_or_else(|| WhoopError::authentication("no authorization code found in redirect URL"))
}

fn non_empty(body: String) -> Option<String> {
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}
