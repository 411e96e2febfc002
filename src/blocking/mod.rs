// ABOUTME: Blocking facade that drives the async client on a private current-thread runtime
// ABOUTME: Refuses to run inside an existing async runtime instead of deadlocking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Blocking client
//!
//! Every call builds a current-thread tokio runtime, opens a [`WhoopClient`]
//! session on it, runs the async operation to completion and closes the
//! session. The token is shared across calls, so a refresh made during one
//! call is visible to the next.
//!
//! ```rust,no_run
//! use whoopy::prelude::*;
//!
//! # fn run() -> whoopy::errors::WhoopResult<()> {
//! let client = BlockingWhoopClient::from_config("config.json", ".whoop_credentials.json")?;
//! for sleep in client.sleep().iterate(ListParams::new())? {
//!     println!("{} nap={}", sleep.start, sleep.nap);
//! }
//! # Ok(())
//! # }
//! ```

/// Blocking resource handlers
pub mod handlers;

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use tokio::runtime::{Builder, Handle};
use tracing::debug;

pub use handlers::{
    BlockingCycleHandler, BlockingRecoveryHandler, BlockingSleepHandler, BlockingUserHandler,
    BlockingWorkoutHandler,
};

use crate::client::builder::ClientParts;
use crate::client::{WhoopClient, WhoopClientBuilder};
use crate::config::{ClientOptions, WhoopConfig};
use crate::constants::oauth::DEFAULT_SCOPES;
use crate::errors::{WhoopError, WhoopResult};
use crate::oauth2_client::{TokenInfo, TokenManager, TokenState};

/// Synchronous WHOOP client
pub struct BlockingWhoopClient {
    parts: ClientParts,
}

impl BlockingWhoopClient {
    pub(crate) const fn from_parts(parts: ClientParts) -> Self {
        Self { parts }
    }

    /// Start building a client; finish with [`WhoopClientBuilder::build_blocking`]
    #[must_use]
    pub fn builder() -> WhoopClientBuilder {
        WhoopClientBuilder::new()
    }

    /// Client for an existing access token, without refresh credentials
    #[must_use]
    pub fn from_token(
        access_token: impl Into<String>,
        expires_in: i64,
        refresh_token: Option<String>,
        scopes: Option<Vec<String>>,
    ) -> Self {
        let scopes =
            scopes.unwrap_or_else(|| DEFAULT_SCOPES.iter().map(|s| (*s).to_owned()).collect());
        Self::builder()
            .token(TokenInfo::new(access_token, expires_in, refresh_token, scopes))
            .build_blocking()
    }

    /// Client from a credentials file and an optional saved token
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the config file is missing or invalid
    pub fn from_config(
        config_path: impl AsRef<Path>,
        token_path: impl AsRef<Path>,
    ) -> WhoopResult<Self> {
        let config = WhoopConfig::from_file(config_path)?;
        Ok(Self::builder()
            .config(config)
            .maybe_token(TokenInfo::load(token_path))
            .build_blocking())
    }

    /// Run an async operation against a fresh session and wait for it
    ///
    /// # Errors
    ///
    /// Returns `Configuration` when called from inside an async runtime or if
    /// the private runtime cannot start, otherwise the operation's result
    pub fn run<T, F, Fut>(&self, operation: F) -> WhoopResult<T>
    where
        F: FnOnce(WhoopClient) -> Fut,
        Fut: Future<Output = WhoopResult<T>>,
    {
        if Handle::try_current().is_ok() {
            return Err(WhoopError::configuration(
                "BlockingWhoopClient cannot be used inside an async runtime; use WhoopClient instead",
            ));
        }

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| WhoopError::configuration(format!("failed to start runtime: {e}")))?;

        runtime.block_on(async {
            let session = self.open_session()?;
            debug!("running blocking call");
            operation(session).await
        })
    }

    fn open_session(&self) -> WhoopResult<WhoopClient> {
        WhoopClient::open(&self.parts)
    }

    /// Credentials this client was built with
    #[must_use]
    pub const fn config(&self) -> Option<&WhoopConfig> {
        self.parts.config.as_ref()
    }

    /// Runtime options
    #[must_use]
    pub const fn options(&self) -> &ClientOptions {
        &self.parts.options
    }

    /// Shared token holder
    #[must_use]
    pub const fn token_manager(&self) -> &Arc<TokenManager> {
        &self.parts.tokens
    }

    /// Snapshot of the current token
    #[must_use]
    pub fn token_info(&self) -> Option<Arc<TokenInfo>> {
        self.parts.tokens.current()
    }

    /// Current token lifecycle state
    #[must_use]
    pub fn token_state(&self) -> TokenState {
        self.parts.tokens.state()
    }

    /// Persist the current token as JSON
    ///
    /// # Errors
    ///
    /// Returns `Configuration` without a token, `Storage` on write failure
    pub fn save_token(&self, path: impl AsRef<Path>) -> WhoopResult<()> {
        self.parts.tokens.save(path)
    }

    /// URL the user visits to authorize this application
    ///
    /// # Errors
    ///
    /// Returns `Configuration` without credentials or with a too-short state
    pub fn authorization_url(&self, state: Option<&str>) -> WhoopResult<String> {
        self.open_session()?.authorization_url(state)
    }

    /// Force a token refresh
    ///
    /// # Errors
    ///
    /// Returns `Configuration` without client credentials or inside an async
    /// runtime, `RefreshToken` if the refresh fails
    pub fn refresh_token(&self) -> WhoopResult<Arc<TokenInfo>> {
        self.run(|client| async move { client.refresh_token().await })
    }

    /// Exchange an authorization code and hold the resulting token
    ///
    /// # Errors
    ///
    /// Returns `Configuration` without credentials, `Authentication` if the
    /// code is rejected
    pub fn exchange_code(&self, code: &str) -> WhoopResult<Arc<TokenInfo>> {
        self.run(|client| async move { client.exchange_code(code).await })
    }

    /// User profile and body measurements
    #[must_use]
    pub const fn user(&self) -> BlockingUserHandler<'_> {
        BlockingUserHandler::new(self)
    }

    /// Physiological cycles
    #[must_use]
    pub const fn cycles(&self) -> BlockingCycleHandler<'_> {
        BlockingCycleHandler::new(self)
    }

    /// Sleep activities
    #[must_use]
    pub const fn sleep(&self) -> BlockingSleepHandler<'_> {
        BlockingSleepHandler::new(self)
    }

    /// Recovery scores
    #[must_use]
    pub const fn recovery(&self) -> BlockingRecoveryHandler<'_> {
        BlockingRecoveryHandler::new(self)
    }

    /// Workouts
    #[must_use]
    pub const fn workouts(&self) -> BlockingWorkoutHandler<'_> {
        BlockingWorkoutHandler::new(self)
    }
}
