// ABOUTME: Shared credential holder with single-flight token refresh
// ABOUTME: Concurrent requests observe either the old or the new token, never a partial update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::client::OAuth2Client;
use super::token::{TokenInfo, TokenState};
use crate::errors::{WhoopError, WhoopResult};

/// Owns the current token for one client
///
/// The token is stored as an `Arc<TokenInfo>` and swapped wholesale. Refreshes
/// are serialized; a caller holding a token that another refresh already
/// replaced gets the new token without a second call to the token endpoint.
#[derive(Debug, Default)]
pub struct TokenManager {
    current: RwLock<Option<Arc<TokenInfo>>>,
    refresh_lock: Mutex<()>,
}

impl TokenManager {
    /// Manager holding `token`
    #[must_use]
    pub fn new(token: Option<TokenInfo>) -> Self {
        Self {
            current: RwLock::new(token.map(Arc::new)),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Manager seeded from a token file, empty if the file is absent
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        Self::new(TokenInfo::load(path))
    }

    /// Snapshot of the current token
    #[must_use]
    pub fn current(&self) -> Option<Arc<TokenInfo>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current token
    pub fn set(&self, token: TokenInfo) -> Arc<TokenInfo> {
        let token = Arc::new(token);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&token));
        token
    }

    /// Forget the current token
    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Lifecycle state at `now`
    #[must_use]
    pub fn state_at(&self, now: DateTime<Utc>) -> TokenState {
        self.current()
            .map_or(TokenState::NoToken, |token| token.state_at(now))
    }

    /// Lifecycle state now
    #[must_use]
    pub fn state(&self) -> TokenState {
        self.state_at(Utc::now())
    }

    /// Persist the current token
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if no token is held, or `Storage` on write failure
    pub fn save(&self, path: impl AsRef<Path>) -> WhoopResult<()> {
        let token = self
            .current()
            .ok_or_else(|| WhoopError::configuration("no token to save"))?;
        token.save(path)
    }

    /// Refresh the access token, at most one refresh in flight
    ///
    /// `stale` is the token the caller last used. If the held token is no longer
    /// that one, another caller already refreshed and the held token is returned.
    ///
    /// # Errors
    ///
    /// Returns `RefreshToken` if no refresh token is held or the exchange fails;
    /// the held token is left unchanged in that case
    pub async fn refresh(
        &self,
        oauth: &OAuth2Client,
        stale: Option<&Arc<TokenInfo>>,
    ) -> WhoopResult<Arc<TokenInfo>> {
        let _guard = self.refresh_lock.lock().await;

        let held = self.current();
        if let (Some(stale), Some(held)) = (stale, held.as_ref()) {
            if !Arc::ptr_eq(stale, held) {
                debug!("token already refreshed by a concurrent request");
                return Ok(Arc::clone(held));
            }
        }

        let held = held.ok_or_else(|| WhoopError::refresh("no token available to refresh"))?;
        let refresh_token = held
            .refresh_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| WhoopError::refresh("no refresh token available"))?;

        let token = oauth.refresh(refresh_token, &held.scopes).await?;
        let token = self.set(token);
        info!(expires_at = ?token.expires_at(), "access token refreshed");
        Ok(token)
    }
}
