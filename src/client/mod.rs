// ABOUTME: Async WHOOP API client; one instance is one session over one transport
// ABOUTME: Entry point for resource handlers, token management and the OAuth flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Async client
//!
//! ```rust,no_run
//! use whoopy::prelude::*;
//!
//! # async fn run() -> whoopy::errors::WhoopResult<()> {
//! let client = WhoopClient::from_config("config.json", ".whoop_credentials.json")?;
//! let (profile, cycles) = tokio::join!(
//!     client.user().get_profile(),
//!     client.cycles().get_all(ListParams::new().max_records(50)),
//! );
//! println!("{} has {} cycles", profile?.first_name, cycles?.len());
//! client.close();
//! # Ok(())
//! # }
//! ```

/// Client builder
pub mod builder;
/// Request dispatch and response classification
pub mod dispatcher;

use std::path::Path;
use std::sync::Arc;

use http::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

pub use builder::WhoopClientBuilder;
pub use dispatcher::{classify_response, Dispatcher};

use builder::ClientParts;
use crate::config::{ClientOptions, WhoopConfig};
use crate::constants::oauth::DEFAULT_SCOPES;
use crate::errors::{WhoopError, WhoopResult};
use crate::handlers::{CycleHandler, RecoveryHandler, SleepHandler, UserHandler, WorkoutHandler};
use crate::oauth2_client::{OAuth2Client, OAuth2Config, TokenInfo, TokenManager, TokenState};
use crate::transport::HttpResponse;

/// Async client for the WHOOP developer API
///
/// Building the client acquires a transport from the factory; dropping it or
/// calling [`WhoopClient::close`] releases it. Requests may be issued
/// concurrently from one client; token refresh is shared between them.
pub struct WhoopClient {
    config: Option<WhoopConfig>,
    dispatcher: Dispatcher,
}

impl WhoopClient {
    /// Start building a client
    #[must_use]
    pub fn builder() -> WhoopClientBuilder {
        WhoopClientBuilder::new()
    }

    pub(crate) fn open(parts: &ClientParts) -> WhoopResult<Self> {
        let transport = parts.factory.create(&parts.options)?;
        let oauth = parts.config.as_ref().map(|config| {
            OAuth2Client::new(
                OAuth2Config::new(config.clone(), &parts.options),
                Arc::clone(&transport),
            )
        });
        debug!(
            base = %parts.options.api_base,
            has_credentials = oauth.is_some(),
            "opened client session"
        );
        Ok(Self {
            config: parts.config.clone(),
            dispatcher: Dispatcher::new(
                transport,
                Arc::clone(&parts.retry),
                Arc::clone(&parts.tokens),
                oauth,
                parts.options.clone(),
            ),
        })
    }

    /// Client for an existing access token, without refresh credentials
    ///
    /// `scopes` defaults to the standard scope set.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the transport cannot be created
    pub fn from_token(
        access_token: impl Into<String>,
        expires_in: i64,
        refresh_token: Option<String>,
        scopes: Option<Vec<String>>,
    ) -> WhoopResult<Self> {
        let scopes =
            scopes.unwrap_or_else(|| DEFAULT_SCOPES.iter().map(|s| (*s).to_owned()).collect());
        Self::builder()
            .token(TokenInfo::new(access_token, expires_in, refresh_token, scopes))
            .build()
    }

    /// Client from a credentials file and an optional saved token
    ///
    /// A missing token file is not an error; the client then has no token
    /// until [`WhoopClient::exchange_code`] succeeds.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the config file is missing or invalid
    pub fn from_config(
        config_path: impl AsRef<Path>,
        token_path: impl AsRef<Path>,
    ) -> WhoopResult<Self> {
        let config = WhoopConfig::from_file(config_path)?;
        Self::builder()
            .config(config)
            .maybe_token(TokenInfo::load(token_path))
            .build()
    }

    /// Credentials this client was built with
    #[must_use]
    pub const fn config(&self) -> Option<&WhoopConfig> {
        self.config.as_ref()
    }

    /// Runtime options
    #[must_use]
    pub const fn options(&self) -> &ClientOptions {
        self.dispatcher.options()
    }

    /// Shared token holder
    #[must_use]
    pub const fn token_manager(&self) -> &Arc<TokenManager> {
        self.dispatcher.tokens()
    }

    /// Snapshot of the current token
    #[must_use]
    pub fn token_info(&self) -> Option<Arc<TokenInfo>> {
        self.dispatcher.tokens().current()
    }

    /// Current token lifecycle state
    #[must_use]
    pub fn token_state(&self) -> TokenState {
        self.dispatcher.tokens().state()
    }

    /// Persist the current token as JSON
    ///
    /// # Errors
    ///
    /// Returns `Configuration` without a token, `Storage` on write failure
    pub fn save_token(&self, path: impl AsRef<Path>) -> WhoopResult<()> {
        self.dispatcher.tokens().save(path)
    }

    /// Force a token refresh
    ///
    /// # Errors
    ///
    /// Returns `Configuration` without client credentials, `RefreshToken` if
    /// the refresh fails
    pub async fn refresh_token(&self) -> WhoopResult<Arc<TokenInfo>> {
        let held = self.token_info();
        self.dispatcher.refresh(held.as_ref()).await
    }

    fn oauth(&self) -> WhoopResult<&OAuth2Client> {
        self.dispatcher.oauth().ok_or_else(|| {
            WhoopError::configuration("client_id and client_secret are required for OAuth")
        })
    }

    /// URL the user visits to authorize this application
    ///
    /// # Errors
    ///
    /// Returns `Configuration` without credentials or with a too-short state
    pub fn authorization_url(&self, state: Option<&str>) -> WhoopResult<String> {
        self.oauth()?.authorization_url(state)
    }

    /// Exchange an authorization code and hold the resulting token
    ///
    /// # Errors
    ///
    /// Returns `Configuration` without credentials, `Authentication` if the
    /// code is rejected
    pub async fn exchange_code(&self, code: &str) -> WhoopResult<Arc<TokenInfo>> {
        let token = self.oauth()?.exchange_code(code).await?;
        info!("authorization complete");
        Ok(self.dispatcher.tokens().set(token))
    }

    /// Send an authenticated request and return the raw response
    ///
    /// # Errors
    ///
    /// Returns the classified failure, see [`Dispatcher::request`]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> WhoopResult<HttpResponse> {
        self.dispatcher.request(method, path, query, body).await
    }

    /// `GET` `path` and decode the JSON body
    ///
    /// # Errors
    ///
    /// Returns the classified failure or `Deserialization`
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> WhoopResult<T> {
        self.request(Method::GET, path, query, None)
            .await?
            .json(path)
    }

    /// User profile and body measurements
    #[must_use]
    pub const fn user(&self) -> UserHandler<'_> {
        UserHandler::new(self)
    }

    /// Physiological cycles
    #[must_use]
    pub const fn cycles(&self) -> CycleHandler<'_> {
        CycleHandler::new(self)
    }

    /// Sleep activities
    #[must_use]
    pub const fn sleep(&self) -> SleepHandler<'_> {
        SleepHandler::new(self)
    }

    /// Recovery scores
    #[must_use]
    pub const fn recovery(&self) -> RecoveryHandler<'_> {
        RecoveryHandler::new(self)
    }

    /// Workouts
    #[must_use]
    pub const fn workouts(&self) -> WorkoutHandler<'_> {
        WorkoutHandler::new(self)
    }

    /// End the session and release the transport
    pub fn close(self) {
        debug!("closed client session");
    }
}
