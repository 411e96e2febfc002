// ABOUTME: Core types and constants for the whoopy WHOOP API client
// ABOUTME: Foundation crate with the error taxonomy, API constants, and pagination wire types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Whoopy Core
//!
//! Foundation crate shared by the `whoopy` client. It holds the types that
//! rarely change so the client crate can be rebuilt without touching them.
//!
//! ## Modules
//!
//! - **errors**: `WhoopError`, the closed `ErrorCategory` set and `CategorySet`
//! - **constants**: API endpoints, OAuth scopes, retry and paging defaults
//! - **pagination**: `Page<T>` and `PageQuery`, the cursor wire format

/// Error taxonomy shared by every layer of the client
pub mod errors;

/// Endpoint URLs, scopes and tuning defaults organized by domain
pub mod constants;

/// Cursor-based page types exchanged with list endpoints
pub mod pagination;

pub use errors::{CategorySet, ErrorCategory, WhoopError, WhoopResult};
pub use pagination::{Page, PageQuery};
