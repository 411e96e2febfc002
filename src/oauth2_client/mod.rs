// ABOUTME: OAuth 2.0 token lifecycle for the WHOOP API
// ABOUTME: Authorization URL, code exchange, refresh, expiry detection and persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OAuth 2.0 Client Module
//!
//! Token state moves through `NoToken -> Valid -> Expired -> Valid`:
//! - code exchange takes a client from no token to a valid one
//! - time moves a valid token to expired
//! - refresh replaces an expired token with a new valid one

/// Authorization-code client for the token endpoint
pub mod client;
/// Shared token holder with single-flight refresh
pub mod manager;
/// Token bundle and persistence
pub mod token;

pub use client::{extract_code, OAuth2Client, OAuth2Config};
pub use manager::TokenManager;
pub use token::{TokenInfo, TokenState};
