// ABOUTME: WHOOP workout record with strain, heart-rate zones and distance
// ABOUTME: Workout ids are UUID strings in the v2 API and carry a sport name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::ScoreState;

/// Workout activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Workout id (UUID)
    pub id: String,
    /// Id from the v1 API, for migration
    #[serde(default)]
    pub v1_id: Option<i64>,
    /// Owning user
    pub user_id: i64,
    /// When WHOOP created the record
    pub created_at: DateTime<Utc>,
    /// When WHOOP last updated the record
    pub updated_at: DateTime<Utc>,
    /// Workout start
    pub start: DateTime<Utc>,
    /// Workout end
    pub end: DateTime<Utc>,
    /// User's timezone offset
    #[serde(default)]
    pub timezone_offset: String,
    /// Sport name, e.g. `running`
    #[serde(default)]
    pub sport_name: String,
    /// Legacy numeric sport id
    #[serde(default)]
    pub sport_id: Option<i32>,
    /// Scoring status
    #[serde(default)]
    pub score_state: ScoreState,
    /// Workout score when scored
    #[serde(default)]
    pub score: Option<WorkoutScore>,
}

impl Workout {
    /// Elapsed time between start and end
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Scored workout metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutScore {
    /// Workout strain on the 0-21 scale
    pub strain: f64,
    /// Average heart rate in bpm
    pub average_heart_rate: i32,
    /// Maximum heart rate in bpm
    pub max_heart_rate: i32,
    /// Energy expenditure in kilojoules
    pub kilojoule: f64,
    /// Share of the workout with heart-rate data
    #[serde(default)]
    pub percent_recorded: Option<f64>,
    /// Distance in meters
    #[serde(default)]
    pub distance_meter: Option<f64>,
    /// Cumulative elevation gain in meters
    #[serde(default)]
    pub altitude_gain_meter: Option<f64>,
    /// Net elevation change in meters
    #[serde(default)]
    pub altitude_change_meter: Option<f64>,
    /// Time in each heart-rate zone
    #[serde(default)]
    pub zone_durations: Option<ZoneDurations>,
}

/// Milliseconds spent in each heart-rate zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneDurations {
    /// Below zone one
    pub zone_zero_milli: i64,
    /// Zone one
    pub zone_one_milli: i64,
    /// Zone two
    pub zone_two_milli: i64,
    /// Zone three
    pub zone_three_milli: i64,
    /// Zone four
    pub zone_four_milli: i64,
    /// Zone five
    pub zone_five_milli: i64,
}
