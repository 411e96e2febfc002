// ABOUTME: Constants for the WHOOP developer API organized by domain
// ABOUTME: Endpoint URLs, OAuth scopes, file locations, paging and retry defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// WHOOP API endpoints
pub mod api {
    /// Root of every WHOOP API URL
    pub const API_BASE: &str = "https://api.prod.whoop.com/";
    /// Versioned prefix appended to the base for resource requests
    pub const DEVELOPER_PREFIX: &str = "developer/v2";
    /// OAuth2 authorization endpoint
    pub const AUTH_URL: &str = "https://api.prod.whoop.com/oauth/oauth2/auth";
    /// OAuth2 token endpoint used for code exchange and refresh
    pub const TOKEN_URL: &str = "https://api.prod.whoop.com/oauth/oauth2/token";
    /// User agent sent with every request
    pub const USER_AGENT: &str = concat!("whoopy/", env!("CARGO_PKG_VERSION"));
}

/// OAuth2 parameters
pub mod oauth {
    /// Scopes requested when the caller does not choose any
    pub const DEFAULT_SCOPES: &[&str] = &[
        "offline",
        "read:recovery",
        "read:cycles",
        "read:sleep",
        "read:workout",
        "read:profile",
        "read:body_measurement",
    ];
    /// Scope that grants a refresh token
    pub const OFFLINE_SCOPE: &str = "offline";
    /// Redirect URI used when the configuration omits one
    pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:1234";
    /// WHOOP rejects shorter `state` values
    pub const MIN_STATE_LENGTH: usize = 8;
    /// Tokens are treated as expired this many seconds before the real boundary
    pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;
    /// Lifetime assumed when the token endpoint omits `expires_in`
    pub const DEFAULT_EXPIRES_IN: i64 = 3600;
    /// Authorization scheme used when none is given
    pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";
}

/// Default file locations
pub mod files {
    /// Client credentials file
    pub const DEFAULT_CONFIG_PATH: &str = "config.json";
    /// Persisted token file
    pub const DEFAULT_TOKEN_PATH: &str = ".whoop_credentials.json";
}

/// Page sizes accepted by list endpoints
pub mod pagination {
    /// Limit used by single-page fetches
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    /// Limit used per request by full-collection fetches and iteration
    pub const DEFAULT_BULK_PAGE_SIZE: u32 = 25;
    /// Smallest limit the API accepts
    pub const MIN_PAGE_SIZE: u32 = 1;
    /// Largest limit the API accepts
    pub const MAX_PAGE_SIZE: u32 = 25;
}

/// Retry defaults and their environment overrides
pub mod retry {
    /// Total attempts including the first call
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    /// Delay before the first retry in milliseconds
    pub const DEFAULT_BASE_DELAY_MS: u64 = 1_000;
    /// Ceiling for any single delay in milliseconds
    pub const DEFAULT_MAX_DELAY_MS: u64 = 60_000;
    /// Growth factor between consecutive delays
    pub const DEFAULT_EXPONENTIAL_BASE: f64 = 2.0;
    /// Lower bound of the multiplicative jitter window
    pub const JITTER_LOW: f64 = 0.8;
    /// Upper bound of the multiplicative jitter window
    pub const JITTER_HIGH: f64 = 1.2;

    /// Environment variable overriding the attempt count
    pub const ENV_MAX_ATTEMPTS: &str = "WHOOP_RETRY_MAX_ATTEMPTS";
    /// Environment variable overriding the base delay in milliseconds
    pub const ENV_BASE_DELAY_MS: &str = "WHOOP_RETRY_BASE_DELAY_MS";
    /// Environment variable overriding the delay ceiling in milliseconds
    pub const ENV_MAX_DELAY_MS: &str = "WHOOP_RETRY_MAX_DELAY_MS";
}

/// HTTP client settings
pub mod network {
    /// Whole-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// TCP connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Environment variables read by `WhoopConfig::from_env`
pub mod env {
    /// OAuth client id
    pub const CLIENT_ID: &str = "WHOOP_CLIENT_ID";
    /// OAuth client secret
    pub const CLIENT_SECRET: &str = "WHOOP_CLIENT_SECRET";
    /// OAuth redirect URI
    pub const REDIRECT_URI: &str = "WHOOP_REDIRECT_URI";
}
