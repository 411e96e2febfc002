// ABOUTME: OAuth2 token bundle with expiry detection and JSON file persistence
// ABOUTME: Tokens are immutable once issued and replaced wholesale on refresh
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Debug, Formatter};
use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::oauth::{DEFAULT_TOKEN_TYPE, TOKEN_EXPIRY_MARGIN_SECS};
use crate::errors::{WhoopError, WhoopResult};

fn default_token_type() -> String {
    DEFAULT_TOKEN_TYPE.to_owned()
}

/// Lifecycle state of the held credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// No token has been obtained or loaded
    NoToken,
    /// Token is usable
    Valid,
    /// Token is past its expiry (including the safety margin)
    Expired,
}

/// Credential bundle issued by the WHOOP token endpoint
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Bearer credential sent on every request
    pub access_token: String,
    /// Authorization scheme, normally `Bearer`
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// When the token was issued
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Lifetime in seconds from `created_at`
    pub expires_in: i64,
    /// Long-lived credential for obtaining a new access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Scopes granted to this token
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl TokenInfo {
    /// Token issued now
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        expires_in: i64,
        refresh_token: Option<String>,
        scopes: Vec<String>,
    ) -> Self {
        Self::issued_at(access_token, Utc::now(), expires_in, refresh_token, scopes)
    }

    /// Token issued at `created_at`
    #[must_use]
    pub fn issued_at(
        access_token: impl Into<String>,
        created_at: DateTime<Utc>,
        expires_in: i64,
        refresh_token: Option<String>,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            created_at,
            expires_in,
            refresh_token,
            scopes,
        }
    }

    /// Moment the server stops accepting this token
    ///
    /// `None` when `created_at + expires_in` is not a representable time.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        TimeDelta::try_seconds(self.expires_in)
            .and_then(|lifetime| self.created_at.checked_add_signed(lifetime))
    }

    /// Whether the token is expired at `now`, counting the safety margin
    ///
    /// A token whose expiry cannot be computed counts as expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let deadline = TimeDelta::try_seconds(TOKEN_EXPIRY_MARGIN_SECS)
            .and_then(|margin| now.checked_add_signed(margin));
        match (deadline, self.expires_at()) {
            (Some(deadline), Some(expires_at)) => deadline >= expires_at,
            _ => true,
        }
    }

    /// Whether the token is expired now
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// State of this token at `now`
    #[must_use]
    pub fn state_at(&self, now: DateTime<Utc>) -> TokenState {
        if self.is_expired_at(now) {
            TokenState::Expired
        } else {
            TokenState::Valid
        }
    }

    /// Whether a refresh token is held
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Value for the `Authorization` header
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Write the token as pretty JSON, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the directory or file cannot be written
    pub fn save(&self, path: impl AsRef<Path>) -> WhoopResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| WhoopError::Storage {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| WhoopError::deserialization("token file", e))?;
        fs::write(path, json).map_err(|source| WhoopError::Storage {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "saved token");
        Ok(())
    }

    /// Read a token saved by [`TokenInfo::save`]
    ///
    /// Returns `None` when the file is missing or cannot be parsed.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no saved token");
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable token file");
                None
            }
        }
    }
}

impl Debug for TokenInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenInfo")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("created_at", &self.created_at)
            .field("expires_in", &self.expires_in)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("scopes", &self.scopes)
            .finish()
    }
}
