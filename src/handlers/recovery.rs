// ABOUTME: Recovery collection accessor at `recovery`
// ABOUTME: Recoveries are addressed through their cycle rather than their own id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use crate::client::WhoopClient;
use crate::errors::WhoopResult;
use crate::models::Recovery;
use crate::pagination::{
    collect_all, fetch_single_page, record_stream, ListParams, Page, PageQuery, PageSource,
    RecordStream,
};

const RECOVERY_PATH: &str = "recovery";

/// Accessor for recovery scores
#[derive(Clone, Copy)]
pub struct RecoveryHandler<'a> {
    client: &'a WhoopClient,
}

impl<'a> RecoveryHandler<'a> {
    /// Handler bound to `client`
    #[must_use]
    pub const fn new(client: &'a WhoopClient) -> Self {
        Self { client }
    }

    /// Recovery for one cycle
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the cycle has no recovery
    pub async fn get_for_cycle(self, cycle_id: i64) -> WhoopResult<Recovery> {
        self.client.cycles().get_recovery(cycle_id).await
    }

    /// One page of recoveries
    ///
    /// # Errors
    ///
    /// Returns any request failure
    pub async fn get_page(self, params: ListParams) -> WhoopResult<Page<Recovery>> {
        fetch_single_page(&self, params).await
    }

    /// Every recovery in range, up to `max_records`
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub async fn get_all(self, params: ListParams) -> WhoopResult<Vec<Recovery>> {
        collect_all(&self, params).await
    }

    /// Lazy stream of recoveries in range
    #[must_use]
    pub fn iterate(self, params: ListParams) -> RecordStream<'a, Recovery> {
        record_stream(self, params)
    }
}

#[async_trait]
impl PageSource for RecoveryHandler<'_> {
    type Record = Recovery;

    async fn fetch_page(&self, query: PageQuery) -> WhoopResult<Page<Recovery>> {
        self.client
            .get_json(RECOVERY_PATH, query.to_query_pairs())
            .await
    }
}
