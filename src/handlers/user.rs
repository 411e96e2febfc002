// ABOUTME: User accessor for the basic profile and body measurements
// ABOUTME: Single-resource endpoints under `user/`
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::client::WhoopClient;
use crate::errors::WhoopResult;
use crate::models::{UserBasicProfile, UserBodyMeasurement};

const PROFILE_PATH: &str = "user/profile/basic";
const BODY_MEASUREMENT_PATH: &str = "user/measurement/body";

/// Accessor for the authorized user
#[derive(Clone, Copy)]
pub struct UserHandler<'a> {
    client: &'a WhoopClient,
}

impl<'a> UserHandler<'a> {
    /// Handler bound to `client`
    #[must_use]
    pub const fn new(client: &'a WhoopClient) -> Self {
        Self { client }
    }

    /// Name and email of the user
    ///
    /// # Errors
    ///
    /// Returns any request failure; requires the `read:profile` scope
    pub async fn get_profile(self) -> WhoopResult<UserBasicProfile> {
        self.client.get_json(PROFILE_PATH, Vec::new()).await
    }

    /// Height, weight and maximum heart rate
    ///
    /// # Errors
    ///
    /// Returns any request failure; requires the `read:body_measurement` scope
    pub async fn get_body_measurements(self) -> WhoopResult<UserBodyMeasurement> {
        self.client.get_json(BODY_MEASUREMENT_PATH, Vec::new()).await
    }
}
