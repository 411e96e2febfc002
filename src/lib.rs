// ABOUTME: Main library entry point for the whoopy WHOOP API client
// ABOUTME: Async and blocking clients with OAuth2 token lifecycle, retries and cursor pagination
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # whoopy
//!
//! Client for the WHOOP developer API (v2).
//!
//! ## Features
//!
//! - **`OAuth2` token lifecycle**: authorization URL, code exchange, persisted
//!   tokens and automatic refresh with at most one refresh in flight
//! - **Retries**: exponential backoff with jitter for rate limits and server
//!   errors, honouring `Retry-After`
//! - **Cursor pagination**: single pages, eager collection and lazy streams
//! - **Dual mode**: [`WhoopClient`] for async code, [`BlockingWhoopClient`]
//!   for synchronous callers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use whoopy::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> WhoopResult<()> {
//!     let client = WhoopClient::from_config("config.json", ".whoop_credentials.json")?;
//!     let recoveries = client
//!         .recovery()
//!         .get_all(ListParams::new().max_records(7))
//!         .await?;
//!     for recovery in &recoveries {
//!         if let Some(score) = &recovery.score {
//!             println!("cycle {}: {:.0}%", recovery.cycle_id, score.recovery_score);
//!         }
//!     }
//!     client.save_token(".whoop_credentials.json")?;
//!     Ok(())
//! }
//! ```

pub use whoopy_core::{constants, errors};

/// Blocking facade over the async client
pub mod blocking;

/// Async client, builder and request dispatch
pub mod client;

/// Credentials and runtime options
pub mod config;

/// Resource accessors
pub mod handlers;

/// Tracing subscriber setup
pub mod logging;

/// Typed API records
pub mod models;

/// `OAuth2` client, token storage and single-flight refresh
pub mod oauth2_client;

/// Cursor pagination engine
pub mod pagination;

/// Backoff calculation and retry policy
pub mod retry;

/// HTTP transport boundary
pub mod transport;

pub use blocking::BlockingWhoopClient;
pub use client::{WhoopClient, WhoopClientBuilder};
pub use config::{ClientOptions, WhoopConfig};
pub use errors::{ErrorCategory, WhoopError, WhoopResult};
pub use oauth2_client::{TokenInfo, TokenState};
pub use pagination::{ListParams, Page};
pub use retry::RetryConfig;

/// Common imports for client code
pub mod prelude {
    pub use crate::blocking::BlockingWhoopClient;
    pub use crate::client::WhoopClient;
    pub use crate::config::{ClientOptions, WhoopConfig};
    pub use crate::errors::{ErrorCategory, WhoopError, WhoopResult};
    pub use crate::models::{
        Cycle, Recovery, ScoreState, Sleep, UserBasicProfile, UserBodyMeasurement, Workout,
    };
    pub use crate::oauth2_client::{TokenInfo, TokenState};
    pub use crate::pagination::{ListParams, Page, PageSource};
    pub use crate::retry::RetryConfig;
}
