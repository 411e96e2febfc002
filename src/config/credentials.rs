// ABOUTME: OAuth client credentials loaded from a JSON config file or the environment
// ABOUTME: Accepts flat and nested "whoop" layouts and reports actionable configuration errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::{self, Debug, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::constants::env as env_keys;
use crate::constants::oauth::DEFAULT_REDIRECT_URI;
use crate::errors::{WhoopError, WhoopResult};

const EXAMPLE_CONFIG: &str = r#"{
  "client_id": "your-client-id",
  "client_secret": "your-client-secret",
  "redirect_uri": "http://localhost:1234"
}"#;

/// OAuth application credentials registered with WHOOP
#[derive(Clone, PartialEq, Eq)]
pub struct WhoopConfig {
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect URI registered for the application
    pub redirect_uri: String,
}

#[derive(Deserialize)]
struct RawConfig {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
}

impl WhoopConfig {
    /// Credentials with an explicit redirect URI
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Load credentials from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the file is missing, unreadable, not JSON, or
    /// lacks `client_id` / `client_secret`
    pub fn from_file(path: impl AsRef<Path>) -> WhoopResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                WhoopError::configuration(format!(
                    "config file not found: {}. Create it with your WHOOP application credentials:\n{EXAMPLE_CONFIG}",
                    path.display()
                ))
            } else {
                WhoopError::configuration(format!(
                    "failed to read config file {}: {e}",
                    path.display()
                ))
            }
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_json_str(&contents)
    }

    /// Parse credentials from JSON text
    ///
    /// Both `{"client_id": ...}` and `{"whoop": {"client_id": ...}}` are accepted.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` for invalid JSON or missing credentials
    pub fn from_json_str(contents: &str) -> WhoopResult<Self> {
        let mut document: Value = serde_json::from_str(contents)
            .map_err(|e| WhoopError::configuration(format!("config file is not valid JSON: {e}")))?;
        if document.get("whoop").is_some_and(Value::is_object) {
            document = document["whoop"].take();
        }
        let raw: RawConfig = serde_json::from_value(document)
            .map_err(|e| WhoopError::configuration(format!("invalid config layout: {e}")))?;
        Self::from_parts(raw.client_id, raw.client_secret, raw.redirect_uri)
    }

    /// Load credentials from `WHOOP_CLIENT_ID`, `WHOOP_CLIENT_SECRET` and `WHOOP_REDIRECT_URI`
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the id or secret is unset
    pub fn from_env() -> WhoopResult<Self> {
        Self::from_parts(
            env::var(env_keys::CLIENT_ID).ok(),
            env::var(env_keys::CLIENT_SECRET).ok(),
            env::var(env_keys::REDIRECT_URI).ok(),
        )
    }

    fn from_parts(
        client_id: Option<String>,
        client_secret: Option<String>,
        redirect_uri: Option<String>,
    ) -> WhoopResult<Self> {
        let client_id = client_id.filter(|v| !v.trim().is_empty());
        let client_secret = client_secret.filter(|v| !v.trim().is_empty());
        match (client_id, client_secret) {
            (Some(client_id), Some(client_secret)) => Ok(Self {
                client_id,
                client_secret,
                redirect_uri: redirect_uri
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_owned()),
            }),
            _ => Err(WhoopError::configuration(
                "client_id and client_secret are required",
            )),
        }
    }
}

impl Debug for WhoopConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WhoopConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}
