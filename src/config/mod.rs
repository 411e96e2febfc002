// ABOUTME: Configuration module for client credentials and runtime options
// ABOUTME: Credentials come from a JSON file or environment, options from code or environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration
//!
//! - **credentials**: [`WhoopConfig`], the OAuth application credentials
//! - **client**: [`ClientOptions`], endpoints, timeouts, retry and refresh settings

/// OAuth application credentials
pub mod credentials;

/// Runtime client options
pub mod client;

pub use client::ClientOptions;
pub use credentials::WhoopConfig;
