// ABOUTME: WHOOP sleep activity record with stage breakdown and sleep need
// ABOUTME: Sleep ids are UUID strings in the v2 API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ScoreState;

/// Sleep activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sleep {
    /// Sleep id (UUID)
    pub id: String,
    /// Cycle this sleep belongs to
    #[serde(default)]
    pub cycle_id: Option<i64>,
    /// Id from the v1 API, for migration
    #[serde(default)]
    pub v1_id: Option<i64>,
    /// Owning user
    pub user_id: i64,
    /// When WHOOP created the record
    pub created_at: DateTime<Utc>,
    /// When WHOOP last updated the record
    pub updated_at: DateTime<Utc>,
    /// Sleep start
    pub start: DateTime<Utc>,
    /// Sleep end
    pub end: DateTime<Utc>,
    /// User's timezone offset
    #[serde(default)]
    pub timezone_offset: String,
    /// Whether this was a nap
    #[serde(default)]
    pub nap: bool,
    /// Scoring status
    #[serde(default)]
    pub score_state: ScoreState,
    /// Sleep score when scored
    #[serde(default)]
    pub score: Option<SleepScore>,
}

/// Scored sleep metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepScore {
    /// Time spent in each stage
    pub stage_summary: SleepStageSummary,
    /// Breakdown of how much sleep was needed
    pub sleep_needed: SleepNeeded,
    /// Breaths per minute
    #[serde(default)]
    pub respiratory_rate: Option<f64>,
    /// Sleep obtained relative to sleep needed
    #[serde(default)]
    pub sleep_performance_percentage: Option<f64>,
    /// Similarity of sleep timing to previous days
    #[serde(default)]
    pub sleep_consistency_percentage: Option<f64>,
    /// Time asleep relative to time in bed
    #[serde(default)]
    pub sleep_efficiency_percentage: Option<f64>,
}

/// Milliseconds spent in each sleep stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepStageSummary {
    /// Total time in bed
    pub total_in_bed_time_milli: i64,
    /// Total time awake
    pub total_awake_time_milli: i64,
    /// Time without data from the strap
    pub total_no_data_time_milli: i64,
    /// Light sleep
    pub total_light_sleep_time_milli: i64,
    /// Slow wave (deep) sleep
    pub total_slow_wave_sleep_time_milli: i64,
    /// REM sleep
    pub total_rem_sleep_time_milli: i64,
    /// Number of sleep cycles
    pub sleep_cycle_count: i32,
    /// Number of disturbances
    pub disturbance_count: i32,
}

impl SleepStageSummary {
    /// Light, slow wave and REM sleep combined
    #[must_use]
    pub const fn total_sleep_time_milli(&self) -> i64 {
        self.total_light_sleep_time_milli
            + self.total_slow_wave_sleep_time_milli
            + self.total_rem_sleep_time_milli
    }
}

/// Components of the sleep need, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepNeeded {
    /// Baseline need
    pub baseline_milli: i64,
    /// Added by accumulated sleep debt
    pub need_from_sleep_debt_milli: i64,
    /// Added by recent strain
    pub need_from_recent_strain_milli: i64,
    /// Removed by recent naps (negative)
    pub need_from_recent_nap_milli: i64,
}
