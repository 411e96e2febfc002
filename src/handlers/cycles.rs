// ABOUTME: Cycle collection accessor with per-cycle sleep and recovery lookups
// ABOUTME: Lists `cycle` and resolves `cycle/{id}`, `cycle/{id}/sleep`, `cycle/{id}/recovery`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use tracing::instrument;

use crate::client::WhoopClient;
use crate::errors::WhoopResult;
use crate::models::{Cycle, Recovery, Sleep};
use crate::pagination::{
    collect_all, fetch_single_page, record_stream, ListParams, Page, PageQuery, PageSource,
    RecordStream,
};

const CYCLE_PATH: &str = "cycle";

/// Accessor for physiological cycles
#[derive(Clone, Copy)]
pub struct CycleHandler<'a> {
    client: &'a WhoopClient,
}

impl<'a> CycleHandler<'a> {
    /// Handler bound to `client`
    #[must_use]
    pub const fn new(client: &'a WhoopClient) -> Self {
        Self { client }
    }

    /// One cycle by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or any request failure
    #[instrument(skip(self))]
    pub async fn get_by_id(self, cycle_id: i64) -> WhoopResult<Cycle> {
        let path = format!("{CYCLE_PATH}/{cycle_id}");
        self.client.get_json(&path, Vec::new()).await
    }

    /// Sleep belonging to a cycle
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the cycle has no sleep
    pub async fn get_sleep(self, cycle_id: i64) -> WhoopResult<Sleep> {
        let path = format!("{CYCLE_PATH}/{cycle_id}/sleep");
        self.client.get_json(&path, Vec::new()).await
    }

    /// Recovery belonging to a cycle
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the cycle has no recovery
    pub async fn get_recovery(self, cycle_id: i64) -> WhoopResult<Recovery> {
        let path = format!("{CYCLE_PATH}/{cycle_id}/recovery");
        self.client.get_json(&path, Vec::new()).await
    }

    /// One page of cycles
    ///
    /// # Errors
    ///
    /// Returns any request failure
    pub async fn get_page(self, params: ListParams) -> WhoopResult<Page<Cycle>> {
        fetch_single_page(&self, params).await
    }

    /// Every cycle in range, up to `max_records`
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub async fn get_all(self, params: ListParams) -> WhoopResult<Vec<Cycle>> {
        collect_all(&self, params).await
    }

    /// Lazy stream of cycles in range
    #[must_use]
    pub fn iterate(self, params: ListParams) -> RecordStream<'a, Cycle> {
        record_stream(self, params)
    }
}

#[async_trait]
impl PageSource for CycleHandler<'_> {
    type Record = Cycle;

    async fn fetch_page(&self, query: PageQuery) -> WhoopResult<Page<Cycle>> {
        self.client.get_json(CYCLE_PATH, query.to_query_pairs()).await
    }
}
