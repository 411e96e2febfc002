// ABOUTME: Error taxonomy for WHOOP API operations with structured status, body and retry detail
// ABOUTME: Closed category set drives retry classification instead of runtime type inspection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Types
//!
//! Every failure surfaced by the client is a [`WhoopError`]. Each variant maps to
//! exactly one [`ErrorCategory`]; the retry layer decides what to retry by
//! checking category membership in a [`CategorySet`].

use std::fmt::{self, Display, Formatter};
use std::io;
use std::path::PathBuf;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Closed set of failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// Credentials missing or rejected
    Authentication,
    /// Access token rejected while a refresh token is available
    TokenExpired,
    /// Refresh token exchange failed or no refresh token is held
    RefreshToken,
    /// Request rejected as malformed (HTTP 400)
    Validation,
    /// Resource does not exist (HTTP 404)
    ResourceNotFound,
    /// Too many requests (HTTP 429)
    RateLimit,
    /// Server-side failure (HTTP 5xx)
    Server,
    /// Client misconfiguration or misuse
    Configuration,
    /// Network failure before any status code was received
    Transport,
    /// Response body did not match the expected schema
    Deserialization,
    /// Filesystem failure while persisting state
    Storage,
    /// Any status code outside the classified set
    Unexpected,
}

impl ErrorCategory {
    /// Stable identifier used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "AUTHENTICATION",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::RefreshToken => "REFRESH_TOKEN",
            Self::Validation => "VALIDATION",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::RateLimit => "RATE_LIMIT",
            Self::Server => "SERVER",
            Self::Configuration => "CONFIGURATION",
            Self::Transport => "TRANSPORT",
            Self::Deserialization => "DESERIALIZATION",
            Self::Storage => "STORAGE",
            Self::Unexpected => "UNEXPECTED",
        }
    }

    /// Single-member set for this category
    #[must_use]
    pub const fn as_set(self) -> CategorySet {
        match self {
            Self::Authentication => CategorySet::AUTHENTICATION,
            Self::TokenExpired => CategorySet::TOKEN_EXPIRED,
            Self::RefreshToken => CategorySet::REFRESH_TOKEN,
            Self::Validation => CategorySet::VALIDATION,
            Self::ResourceNotFound => CategorySet::RESOURCE_NOT_FOUND,
            Self::RateLimit => CategorySet::RATE_LIMIT,
            Self::Server => CategorySet::SERVER,
            Self::Configuration => CategorySet::CONFIGURATION,
            Self::Transport => CategorySet::TRANSPORT,
            Self::Deserialization => CategorySet::DESERIALIZATION,
            Self::Storage => CategorySet::STORAGE,
            Self::Unexpected => CategorySet::UNEXPECTED,
        }
    }
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of error categories, used to configure which failures are retried
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategorySet: u16 {
        /// See [`ErrorCategory::Authentication`]
        const AUTHENTICATION = 1 << 0;
        /// See [`ErrorCategory::TokenExpired`]
        const TOKEN_EXPIRED = 1 << 1;
        /// See [`ErrorCategory::RefreshToken`]
        const REFRESH_TOKEN = 1 << 2;
        /// See [`ErrorCategory::Validation`]
        const VALIDATION = 1 << 3;
        /// See [`ErrorCategory::ResourceNotFound`]
        const RESOURCE_NOT_FOUND = 1 << 4;
        /// See [`ErrorCategory::RateLimit`]
        const RATE_LIMIT = 1 << 5;
        /// See [`ErrorCategory::Server`]
        const SERVER = 1 << 6;
        /// See [`ErrorCategory::Configuration`]
        const CONFIGURATION = 1 << 7;
        /// See [`ErrorCategory::Transport`]
        const TRANSPORT = 1 << 8;
        /// See [`ErrorCategory::Deserialization`]
        const DESERIALIZATION = 1 << 9;
        /// See [`ErrorCategory::Storage`]
        const STORAGE = 1 << 10;
        /// See [`ErrorCategory::Unexpected`]
        const UNEXPECTED = 1 << 11;
    }
}

impl CategorySet {
    /// Transient categories retried by default: rate limiting and server errors
    #[must_use]
    pub const fn transient() -> Self {
        Self::RATE_LIMIT.union(Self::SERVER)
    }

    /// Whether `category` is a member of this set
    #[must_use]
    pub const fn includes(self, category: ErrorCategory) -> bool {
        self.contains(category.as_set())
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::transient()
    }
}

impl FromIterator<ErrorCategory> for CategorySet {
    fn from_iter<I: IntoIterator<Item = ErrorCategory>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, category| set | category.as_set())
    }
}

fn retry_after_suffix(retry_after: &Option<u64>) -> String {
    retry_after.map_or_else(String::new, |secs| format!(" (retry after {secs}s)"))
}

/// Errors produced by the WHOOP client
#[derive(Debug, Error)]
pub enum WhoopError {
    /// Credentials are missing or were rejected (HTTP 401 without a usable refresh token)
    #[error("authentication failed: {message}")]
    Authentication {
        /// What went wrong
        message: String,
        /// HTTP status when the failure came from a response
        status_code: Option<u16>,
        /// Raw response body
        body: Option<String>,
    },

    /// Access token rejected while a refresh token is held; handled by the dispatcher
    #[error("access token expired or was rejected")]
    TokenExpired {
        /// Raw response body
        body: Option<String>,
    },

    /// Obtaining a new access token from the refresh token failed
    #[error("token refresh failed: {message}")]
    RefreshToken {
        /// What went wrong
        message: String,
        /// HTTP status returned by the token endpoint
        status_code: Option<u16>,
        /// Raw token endpoint body
        body: Option<String>,
    },

    /// The API rejected the request as malformed (HTTP 400)
    #[error("request validation failed: {message}")]
    Validation {
        /// Summary message
        message: String,
        /// Structured field-level errors when the body was a JSON object
        field_errors: Option<Map<String, Value>>,
        /// Raw response body
        body: Option<String>,
    },

    /// The requested resource does not exist (HTTP 404)
    #[error("{resource} not found")]
    ResourceNotFound {
        /// Path or description of the missing resource
        resource: String,
        /// Raw response body
        body: Option<String>,
    },

    /// The API is throttling this client (HTTP 429)
    #[error("rate limit exceeded{}", retry_after_suffix(.retry_after))]
    RateLimit {
        /// Seconds to wait, from the `Retry-After` header
        retry_after: Option<u64>,
        /// Raw response body
        body: Option<String>,
    },

    /// The API failed on its side (HTTP 5xx)
    #[error("server error: status {status_code}")]
    Server {
        /// HTTP status code
        status_code: u16,
        /// Raw response body
        body: Option<String>,
    },

    /// Client configuration is missing, invalid, or the client was misused
    #[error("configuration error: {message}")]
    Configuration {
        /// Actionable description
        message: String,
    },

    /// The request never produced a response
    #[error("transport error: {message}")]
    Transport {
        /// Underlying network failure
        message: String,
    },

    /// A response body could not be decoded
    #[error("failed to decode {context}: {message}")]
    Deserialization {
        /// What was being decoded
        context: String,
        /// Decoder message
        message: String,
    },

    /// Writing persisted state failed
    #[error("storage error at {}: {source}", .path.display())]
    Storage {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Any status code outside the classified set
    #[error("unexpected status code {status_code}")]
    Unexpected {
        /// HTTP status code
        status_code: u16,
        /// Raw response body
        body: Option<String>,
    },
}

/// Result alias used throughout the client
pub type WhoopResult<T> = Result<T, WhoopError>;

impl WhoopError {
    /// Authentication failure without a response
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            status_code: None,
            body: None,
        }
    }

    /// Refresh failure without a response
    #[must_use]
    pub fn refresh(message: impl Into<String>) -> Self {
        Self::RefreshToken {
            message: message.into(),
            status_code: None,
            body: None,
        }
    }

    /// Configuration or usage error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Network-level failure
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Decoding failure for `context`
    #[must_use]
    pub fn deserialization(context: impl Into<String>, error: impl Display) -> Self {
        Self::Deserialization {
            context: context.into(),
            message: error.to_string(),
        }
    }

    /// Category of this error
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication { .. } => ErrorCategory::Authentication,
            Self::TokenExpired { .. } => ErrorCategory::TokenExpired,
            Self::RefreshToken { .. } => ErrorCategory::RefreshToken,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::ResourceNotFound { .. } => ErrorCategory::ResourceNotFound,
            Self::RateLimit { .. } => ErrorCategory::RateLimit,
            Self::Server { .. } => ErrorCategory::Server,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Transport { .. } => ErrorCategory::Transport,
            Self::Deserialization { .. } => ErrorCategory::Deserialization,
            Self::Storage { .. } => ErrorCategory::Storage,
            Self::Unexpected { .. } => ErrorCategory::Unexpected,
        }
    }

    /// HTTP status code attached to this error, if any
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Authentication { status_code, .. } | Self::RefreshToken { status_code, .. } => {
                *status_code
            }
            Self::TokenExpired { .. } => Some(401),
            Self::Validation { .. } => Some(400),
            Self::ResourceNotFound { .. } => Some(404),
            Self::RateLimit { .. } => Some(429),
            Self::Server { status_code, .. } | Self::Unexpected { status_code, .. } => {
                Some(*status_code)
            }
            Self::Configuration { .. }
            | Self::Transport { .. }
            | Self::Deserialization { .. }
            | Self::Storage { .. } => None,
        }
    }

    /// Raw response body attached to this error, if any
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Authentication { body, .. }
            | Self::TokenExpired { body }
            | Self::RefreshToken { body, .. }
            | Self::Validation { body, .. }
            | Self::ResourceNotFound { body, .. }
            | Self::RateLimit { body, .. }
            | Self::Server { body, .. }
            | Self::Unexpected { body, .. } => body.as_deref(),
            Self::Configuration { .. }
            | Self::Transport { .. }
            | Self::Deserialization { .. }
            | Self::Storage { .. } => None,
        }
    }

    /// Server-declared wait in seconds for rate limit errors
    #[must_use]
    pub const fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Field-level validation detail for HTTP 400 responses
    #[must_use]
    pub const fn field_errors(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Validation { field_errors, .. } => field_errors.as_ref(),
            _ => None,
        }
    }

    /// Whether the default retry policy would retry this error
    #[must_use]
    pub const fn is_retryable_by_default(&self) -> bool {
        CategorySet::transient().includes(self.category())
    }
}
