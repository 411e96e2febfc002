// ABOUTME: WHOOP physiological cycle record and its strain score
// ABOUTME: A cycle spans from one sleep onset to the next; `end` is absent for the current cycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ScoreState;

/// Physiological cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    /// Cycle id
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// When WHOOP created the record
    pub created_at: DateTime<Utc>,
    /// When WHOOP last updated the record
    pub updated_at: DateTime<Utc>,
    /// Cycle start
    pub start: DateTime<Utc>,
    /// Cycle end; `None` while the cycle is ongoing
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    /// User's timezone offset when the cycle started, e.g. `-05:00`
    #[serde(default)]
    pub timezone_offset: String,
    /// Scoring status
    #[serde(default)]
    pub score_state: ScoreState,
    /// Strain score when scored
    #[serde(default)]
    pub score: Option<CycleScore>,
}

/// Strain and heart-rate summary for a cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleScore {
    /// Day strain on the 0-21 scale
    pub strain: f64,
    /// Energy expenditure in kilojoules
    pub kilojoule: f64,
    /// Average heart rate in bpm
    pub average_heart_rate: i32,
    /// Maximum heart rate in bpm
    pub max_heart_rate: i32,
}
