// ABOUTME: Cursor pagination engine over any page-fetching source
// ABOUTME: Single page, eager collection with an optional cap, and a lazy record stream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Cursor pagination
//!
//! A [`PageSource`] fetches one page for a [`PageQuery`]. The functions here
//! walk continuation tokens on top of it; page fetches within one walk are
//! strictly sequential.

use std::pin::Pin;

use async_stream::stream;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::Stream;
use tracing::{debug, warn};

use crate::constants::pagination::{DEFAULT_BULK_PAGE_SIZE, DEFAULT_PAGE_SIZE};
use crate::errors::WhoopResult;

pub use whoopy_core::pagination::{clamp_page_size, format_timestamp, Page, PageQuery};

/// Lazy sequence of records; the next page is fetched when the current one is drained
pub type RecordStream<'a, T> = Pin<Box<dyn Stream<Item = WhoopResult<T>> + Send + 'a>>;

/// Anything that can fetch one page of a list endpoint
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Record type on each page
    type Record: Send;

    /// Fetch the page described by `query`
    async fn fetch_page(&self, query: PageQuery) -> WhoopResult<Page<Self::Record>>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for &S {
    type Record = S::Record;

    async fn fetch_page(&self, query: PageQuery) -> WhoopResult<Page<Self::Record>> {
        (**self).fetch_page(query).await
    }
}

/// Caller-facing list parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Only records starting at or after this time
    pub start: Option<DateTime<Utc>>,
    /// Only records starting before this time
    pub end: Option<DateTime<Utc>>,
    /// Records per request; defaults depend on the operation
    pub page_size: Option<u32>,
    /// Resume from this continuation token
    pub next_token: Option<String>,
    /// Upper bound on records returned by `get_all`
    pub max_records: Option<usize>,
}

impl ListParams {
    /// No bounds, default page size, no cap
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower time bound
    #[must_use]
    pub const fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Upper time bound
    #[must_use]
    pub const fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Records per request, clamped to what the API accepts
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Continuation token to start from
    #[must_use]
    pub fn next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// Cap on collected records
    #[must_use]
    pub const fn max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }

    fn query(&self, default_size: u32, cursor: Option<&str>) -> PageQuery {
        let query = PageQuery::new(
            self.start,
            self.end,
            self.page_size.unwrap_or(default_size),
        );
        match cursor {
            Some(token) => query.with_next_token(token),
            None => query,
        }
    }
}

/// Fetch exactly one page and return it unchanged
///
/// # Errors
///
/// Returns whatever the source returns
pub async fn fetch_single_page<S>(source: &S, params: ListParams) -> WhoopResult<Page<S::Record>>
where
    S: PageSource + ?Sized,
{
    let query = params.query(DEFAULT_PAGE_SIZE, params.next_token.as_deref());
    source.fetch_page(query).await
}

/// Follow continuation tokens and concatenate records in page order
///
/// Stops at the first page without a continuation token, or once
/// `max_records` records are collected (truncating the last page). The first
/// page is always fetched, so a cap of zero costs one request.
///
/// # Errors
///
/// Returns the first page fetch failure; records already collected are dropped
pub async fn collect_all<S>(source: &S, params: ListParams) -> WhoopResult<Vec<S::Record>>
where
    S: PageSource + ?Sized,
{
    let mut records = Vec::new();
    let mut cursor = params.next_token.clone();
    let mut pages = 0_usize;

    loop {
        let page = source
            .fetch_page(params.query(DEFAULT_BULK_PAGE_SIZE, cursor.as_deref()))
            .await?;
        pages += 1;
        let next = page.continuation().map(str::to_owned);
        records.extend(page.records);

        if let Some(max) = params.max_records {
            if records.len() >= max {
                records.truncate(max);
                break;
            }
        }
        match next {
            None => break,
            Some(token) if cursor.as_deref() == Some(token.as_str()) => {
                warn!(pages, "continuation token repeated, stopping pagination");
                break;
            }
            Some(token) => cursor = Some(token),
        }
    }

    debug!(pages, records = records.len(), "pagination complete");
    Ok(records)
}

/// Lazily walk every page, yielding records one at a time
///
/// The stream owns `source`; pass handlers by value and other sources by reference.
///
/// `max_records` is not applied; use `StreamExt::take` instead. The stream
/// ends after the final page or after the first error.
pub fn record_stream<'a, S>(source: S, params: ListParams) -> RecordStream<'a, S::Record>
where
    S: PageSource + 'a,
{
    Box::pin(stream! {
        let mut cursor = params.next_token.clone();
        loop {
            let query = params.query(DEFAULT_BULK_PAGE_SIZE, cursor.as_deref());
            let page = match source.fetch_page(query).await {
                Ok(page) => page,
                Err(err) => {
                    yield Err(err);
                    break;
                }
            };
            let next = page.continuation().map(str::to_owned);
            for record in page.records {
                yield Ok(record);
            }
            match next {
                None => break,
                Some(token) if cursor.as_deref() == Some(token.as_str()) => {
                    warn!("continuation token repeated, stopping pagination");
                    break;
                }
                Some(token) => cursor = Some(token),
            }
        }
    })
}
