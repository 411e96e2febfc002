// ABOUTME: WHOOP recovery record keyed by cycle and sleep
// ABOUTME: Recovery score, resting heart rate and HRV for one cycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ScoreState;

/// Recovery for one cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recovery {
    /// Cycle the recovery belongs to
    pub cycle_id: i64,
    /// Sleep the recovery was computed from (UUID)
    pub sleep_id: String,
    /// Owning user
    pub user_id: i64,
    /// When WHOOP created the record
    pub created_at: DateTime<Utc>,
    /// When WHOOP last updated the record
    pub updated_at: DateTime<Utc>,
    /// Scoring status
    #[serde(default)]
    pub score_state: ScoreState,
    /// Recovery score when scored
    #[serde(default)]
    pub score: Option<RecoveryScore>,
}

/// Scored recovery metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryScore {
    /// Whether WHOOP is still calibrating for this user
    #[serde(default)]
    pub user_calibrating: bool,
    /// Recovery percentage, 0-100
    pub recovery_score: f64,
    /// Resting heart rate in bpm
    pub resting_heart_rate: f64,
    /// Heart rate variability (RMSSD) in milliseconds
    pub hrv_rmssd_milli: f64,
    /// Blood oxygen percentage, 4.0 straps and later
    #[serde(default)]
    pub spo2_percentage: Option<f64>,
    /// Skin temperature in Celsius, 4.0 straps and later
    #[serde(default)]
    pub skin_temp_celsius: Option<f64>,
}
