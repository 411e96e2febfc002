// ABOUTME: Cursor-based page types for WHOOP list endpoints
// ABOUTME: Decodes record pages with continuation tokens and encodes page queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};

/// Timestamp layout accepted by the `start` and `end` query parameters
pub const QUERY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// One page of records returned by a list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records in server order
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,

    /// Opaque continuation token; absent on the final page
    #[serde(default, alias = "nextToken", skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Create a page from records and an optional continuation token
    #[must_use]
    pub const fn new(records: Vec<T>, next_token: Option<String>) -> Self {
        Self {
            records,
            next_token,
        }
    }

    /// Page with no records and no continuation
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            records: Vec::new(),
            next_token: None,
        }
    }

    /// Continuation token, treating an empty string as absent
    #[must_use]
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|token| !token.is_empty())
    }

    /// Whether another page may follow this one
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.continuation().is_some()
    }

    /// Number of records on this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether this page carries no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Parameters of a single list-endpoint request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Inclusive lower bound on record start time
    pub start: Option<DateTime<Utc>>,
    /// Exclusive upper bound on record start time
    pub end: Option<DateTime<Utc>>,
    /// Requested page size, clamped on encoding
    pub limit: u32,
    /// Continuation token from the previous page
    pub next_token: Option<String>,
}

impl PageQuery {
    /// Query for the first page with the given bounds and size
    #[must_use]
    pub const fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>, limit: u32) -> Self {
        Self {
            start,
            end,
            limit,
            next_token: None,
        }
    }

    /// Same query pointed at the page after `token`
    #[must_use]
    pub fn with_next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// Encode as query pairs in the order the API documents them
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(start) = self.start {
            pairs.push(("start".to_owned(), format_timestamp(&start)));
        }
        if let Some(end) = self.end {
            pairs.push(("end".to_owned(), format_timestamp(&end)));
        }
        pairs.push(("limit".to_owned(), clamp_page_size(self.limit).to_string()));
        if let Some(token) = self.next_token.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("nextToken".to_owned(), token.to_owned()));
        }
        pairs
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_PAGE_SIZE)
    }
}

/// Format a timestamp as ISO-8601 UTC with millisecond precision
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(QUERY_TIMESTAMP_FORMAT).to_string()
}

/// Clamp a requested page size into the range the API accepts
#[must_use]
pub fn clamp_page_size(limit: u32) -> u32 {
    limit.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}
