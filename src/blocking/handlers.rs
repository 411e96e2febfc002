// ABOUTME: Blocking mirrors of the resource handlers
// ABOUTME: Lazy iteration is materialized into a Vec before returning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use futures_util::TryStreamExt;

use super::BlockingWhoopClient;
use crate::errors::WhoopResult;
use crate::models::{Cycle, Recovery, Sleep, UserBasicProfile, UserBodyMeasurement, Workout};
use crate::pagination::{ListParams, Page};

/// Blocking accessor for the authorized user
#[derive(Clone, Copy)]
pub struct BlockingUserHandler<'a> {
    client: &'a BlockingWhoopClient,
}

impl<'a> BlockingUserHandler<'a> {
    /// Handler bound to `client`
    #[must_use]
    pub const fn new(client: &'a BlockingWhoopClient) -> Self {
        Self { client }
    }

    /// Name and email of the user
    ///
    /// # Errors
    ///
    /// Returns any request failure, or `Configuration` inside an async runtime
    pub fn get_profile(self) -> WhoopResult<UserBasicProfile> {
        self.client
            .run(|client| async move { client.user().get_profile().await })
    }

    /// Height, weight and maximum heart rate
    ///
    /// # Errors
    ///
    /// Returns any request failure, or `Configuration` inside an async runtime
    pub fn get_body_measurements(self) -> WhoopResult<UserBodyMeasurement> {
        self.client
            .run(|client| async move { client.user().get_body_measurements().await })
    }
}

/// Blocking accessor for physiological cycles
#[derive(Clone, Copy)]
pub struct BlockingCycleHandler<'a> {
    client: &'a BlockingWhoopClient,
}

impl<'a> BlockingCycleHandler<'a> {
    /// Handler bound to `client`
    #[must_use]
    pub const fn new(client: &'a BlockingWhoopClient) -> Self {
        Self { client }
    }

    /// One cycle by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or any request failure
    pub fn get_by_id(self, cycle_id: i64) -> WhoopResult<Cycle> {
        self.client
            .run(|client| async move { client.cycles().get_by_id(cycle_id).await })
    }

    /// Sleep belonging to a cycle
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the cycle has no sleep
    pub fn get_sleep(self, cycle_id: i64) -> WhoopResult<Sleep> {
        self.client
            .run(|client| async move { client.cycles().get_sleep(cycle_id).await })
    }

    /// Recovery belonging to a cycle
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the cycle has no recovery
    pub fn get_recovery(self, cycle_id: i64) -> WhoopResult<Recovery> {
        self.client
            .run(|client| async move { client.cycles().get_recovery(cycle_id).await })
    }

    /// One page of cycles
    ///
    /// # Errors
    ///
    /// Returns any request failure
    pub fn get_page(self, params: ListParams) -> WhoopResult<Page<Cycle>> {
        self.client
            .run(|client| async move { client.cycles().get_page(params).await })
    }

    /// Every cycle in range, up to `max_records`
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub fn get_all(self, params: ListParams) -> WhoopResult<Vec<Cycle>> {
        self.client
            .run(|client| async move { client.cycles().get_all(params).await })
    }

    /// Every cycle in range, walked page by page
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub fn iterate(self, params: ListParams) -> WhoopResult<Vec<Cycle>> {
        self.client.run(|client| async move {
            client.cycles().iterate(params).try_collect().await
        })
    }
}

/// Blocking accessor for sleep activities
#[derive(Clone, Copy)]
pub struct BlockingSleepHandler<'a> {
    client: &'a BlockingWhoopClient,
}

impl<'a> BlockingSleepHandler<'a> {
    /// Handler bound to `client`
    #[must_use]
    pub const fn new(client: &'a BlockingWhoopClient) -> Self {
        Self { client }
    }

    /// One sleep by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or any request failure
    pub fn get_by_id(self, sleep_id: &str) -> WhoopResult<Sleep> {
        self.client
            .run(|client| async move { client.sleep().get_by_id(sleep_id).await })
    }

    /// One page of sleeps
    ///
    /// # Errors
    ///
    /// Returns any request failure
    pub fn get_page(self, params: ListParams) -> WhoopResult<Page<Sleep>> {
        self.client
            .run(|client| async move { client.sleep().get_page(params).await })
    }

    /// Every sleep in range, up to `max_records`
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub fn get_all(self, params: ListParams) -> WhoopResult<Vec<Sleep>> {
        self.client
            .run(|client| async move { client.sleep().get_all(params).await })
    }

    /// Every sleep in range, walked page by page
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub fn iterate(self, params: ListParams) -> WhoopResult<Vec<Sleep>> {
        self.client.run(|client| async move {
            client.sleep().iterate(params).try_collect().await
        })
    }
}

/// Blocking accessor for recovery scores
#[derive(Clone, Copy)]
pub struct BlockingRecoveryHandler<'a> {
    client: &'a BlockingWhoopClient,
}

impl<'a> BlockingRecoveryHandler<'a> {
    /// Handler bound to `client`
    #[must_use]
    pub const fn new(client: &'a BlockingWhoopClient) -> Self {
        Self { client }
    }

    /// Recovery for one cycle
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the cycle has no recovery
    pub fn get_for_cycle(self, cycle_id: i64) -> WhoopResult<Recovery> {
        self.client
            .run(|client| async move { client.recovery().get_for_cycle(cycle_id).await })
    }

    /// One page of recoveries
    ///
    /// # Errors
    ///
    /// Returns any request failure
    pub fn get_page(self, params: ListParams) -> WhoopResult<Page<Recovery>> {
        self.client
            .run(|client| async move { client.recovery().get_page(params).await })
    }

    /// Every recovery in range, up to `max_records`
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub fn get_all(self, params: ListParams) -> WhoopResult<Vec<Recovery>> {
        self.client
            .run(|client| async move { client.recovery().get_all(params).await })
    }

    /// Every recovery in range, walked page by page
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub fn iterate(self, params: ListParams) -> WhoopResult<Vec<Recovery>> {
        self.client.run(|client| async move {
            client.recovery().iterate(params).try_collect().await
        })
    }
}

/// Blocking accessor for workouts
#[derive(Clone, Copy)]
pub struct BlockingWorkoutHandler<'a> {
    client: &'a BlockingWhoopClient,
}

impl<'a> BlockingWorkoutHandler<'a> {
    /// Handler bound to `client`
    #[must_use]
    pub const fn new(client: &'a BlockingWhoopClient) -> Self {
        Self { client }
    }

    /// One workout by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id, or any request failure
    pub fn get_by_id(self, workout_id: &str) -> WhoopResult<Workout> {
        self.client
            .run(|client| async move { client.workouts().get_by_id(workout_id).await })
    }

    /// One page of workouts
    ///
    /// # Errors
    ///
    /// Returns any request failure
    pub fn get_page(self, params: ListParams) -> WhoopResult<Page<Workout>> {
        self.client
            .run(|client| async move { client.workouts().get_page(params).await })
    }

    /// Every workout in range, up to `max_records`
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub fn get_all(self, params: ListParams) -> WhoopResult<Vec<Workout>> {
        self.client
            .run(|client| async move { client.workouts().get_all(params).await })
    }

    /// Workouts whose sport name matches `sport`, ignoring case
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub fn get_by_sport(self, sport: &str, params: ListParams) -> WhoopResult<Vec<Workout>> {
        self.client.run(|client| async move {
            client.workouts().get_by_sport(sport, params).await
        })
    }

    /// Every workout in range, walked page by page
    ///
    /// # Errors
    ///
    /// Returns the first page failure
    pub fn iterate(self, params: ListParams) -> WhoopResult<Vec<Workout>> {
        self.client.run(|client| async move {
            client.workouts().iterate(params).try_collect().await
        })
    }
}
