// ABOUTME: WHOOP user profile and body measurement records
// ABOUTME: Single-resource endpoints, not paginated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Basic profile of the authorized user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBasicProfile {
    /// WHOOP user id
    pub user_id: i64,
    /// Account email
    #[serde(default)]
    pub email: String,
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Last name
    #[serde(default)]
    pub last_name: String,
}

/// Body measurements of the authorized user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBodyMeasurement {
    /// Height in meters
    pub height_meter: f64,
    /// Weight in kilograms
    pub weight_kilogram: f64,
    /// Maximum heart rate in bpm
    pub max_heart_rate: i32,
}
