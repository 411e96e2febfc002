// ABOUTME: Workout collection accessor at `activity/workout`
// ABOUTME: Adds a sport-name filter on top of the paginated listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use tracing::debug;

use super::item_path;
use crate::client::WhoopClient;
use crate::errors::WhoopResult;
use crate::models::Workout;
use crate::pagination::{
    collect_all, fetch_single_page, record_stream, ListParams, Page, PageQuery, PageSource,
    RecordStream,
};

const WORKOUT_PATH: &str = "activity/workout";

/// Accessor for workouts
#[derive(Clone, Copy)]
pub struct WorkoutHandler<'a> {
    client: &'a WhoopClient,
}

impl<'a> WorkoutHandler<'a> {
    /// Handler bound to `client`
    #[must_use]
    pub const fn new(client: &'a WhoopClient) -> Self {
        Self { client }
    }

    /// One workout by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or any request failure
    pub async fn get_by_id(self, workout_id: &str) -> WhoopResult<Workout> {
        let path = item_path(WORKOUT_PATH, workout_id);
        self.client.get_json(&path, Vec::new()).await
    }

    /// One page of workouts
    ///
    /// # Errors
    ///
    /// Returns any request failure
    pub async fn get_page(self, params: ListParams) -> WhoopResult<Page<Workout>> {
        fetch_single_page(&self, params).await
    }

    /// Every workout in range, up to `max_records`
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub async fn get_all(self, params: ListParams) -> WhoopResult<Vec<Workout>> {
        collect_all(&self, params).await
    }

    /// Workouts whose sport name matches `sport`, ignoring case
    ///
    /// The filter runs after collection, so `max_records` caps the records
    /// examined rather than the matches returned.
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub async fn get_by_sport(self, sport: &str, params: ListParams) -> WhoopResult<Vec<Workout>> {
        let workouts = self.get_all(params).await?;
        let total = workouts.len();
        let matching: Vec<Workout> = workouts
            .into_iter()
            .filter(|workout| workout.sport_name.eq_ignore_ascii_case(sport))
            .collect();
        debug!(sport, total, matching = matching.len(), "filtered workouts by sport");
        Ok(matching)
    }

    /// Lazy stream of workouts in range
    #[must_use]
    pub fn iterate(self, params: ListParams) -> RecordStream<'a, Workout> {
        record_stream(self, params)
    }
}

#[async_trait]
impl PageSource for WorkoutHandler<'_> {
    type Record = Workout;

    async fn fetch_page(&self, query: PageQuery) -> WhoopResult<Page<Workout>> {
        self.client
            .get_json(WORKOUT_PATH, query.to_query_pairs())
            .await
    }
}
