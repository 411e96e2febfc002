// ABOUTME: Sleep collection accessor at `activity/sleep`
// ABOUTME: Paginated listing plus lookup of a single sleep by its UUID
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use super::item_path;
use crate::client::WhoopClient;
use crate::errors::WhoopResult;
use crate::models::Sleep;
use crate::pagination::{
    collect_all, fetch_single_page, record_stream, ListParams, Page, PageQuery, PageSource,
    RecordStream,
};

const SLEEP_PATH: &str = "activity/sleep";

/// Accessor for sleep activities
#[derive(Clone, Copy)]
pub struct SleepHandler<'a> {
    client: &'a WhoopClient,
}

impl<'a> SleepHandler<'a> {
    /// Handler bound to `client`
    #[must_use]
    pub const fn new(client: &'a WhoopClient) -> Self {
        Self { client }
    }

    /// One sleep by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or any request failure
    pub async fn get_by_id(self, sleep_id: &str) -> WhoopResult<Sleep> {
        let path = item_path(SLEEP_PATH, sleep_id);
        self.client.get_json(&path, Vec::new()).await
    }

    /// One page of sleeps
    ///
    /// # Errors
    ///
    /// Returns any request failure
    pub async fn get_page(self, params: ListParams) -> WhoopResult<Page<Sleep>> {
        fetch_single_page(&self, params).await
    }

    /// Every sleep in range, up to `max_records`
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub async fn get_all(self, params: ListParams) -> WhoopResult<Vec<Sleep>> {
        collect_all(&self, params).await
    }

    /// Lazy stream of sleeps in range
    #[must_use]
    pub fn iterate(self, params: ListParams) -> RecordStream<'a, Sleep> {
        record_stream(self, params)
    }
}

#[async_trait]
impl PageSource for SleepHandler<'_> {
    type Record = Sleep;

    async fn fetch_page(&self, query: PageQuery) -> WhoopResult<Page<Sleep>> {
        self.client.get_json(SLEEP_PATH, query.to_query_pairs()).await
    }
}
