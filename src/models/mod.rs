// ABOUTME: Typed records returned by the WHOOP v2 developer API
// ABOUTME: Cycles, sleep, recovery, workouts and user profile with nested score types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! WHOOP API records
//!
//! Scores are only present when `score_state` is [`ScoreState::Scored`].

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Physiological cycle
pub mod cycle;
/// Recovery score
pub mod recovery;
/// Sleep activity
pub mod sleep;
/// User profile and body measurements
pub mod user;
/// Workout activity
pub mod workout;

pub use cycle::{Cycle, CycleScore};
pub use recovery::{Recovery, RecoveryScore};
pub use sleep::{Sleep, SleepNeeded, SleepScore, SleepStageSummary};
pub use user::{UserBasicProfile, UserBodyMeasurement};
pub use workout::{Workout, WorkoutScore, ZoneDurations};

/// Scoring status of a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScoreState {
    /// Score is available
    Scored,
    /// WHOOP has not finished scoring
    #[default]
    PendingScore,
    /// The record cannot be scored
    Unscorable,
    /// A state this client does not know, kept verbatim
    Other(String),
}

impl ScoreState {
    /// Wire representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Scored => "SCORED",
            Self::PendingScore => "PENDING_SCORE",
            Self::Unscorable => "UNSCORABLE",
            Self::Other(value) => value,
        }
    }

    /// Whether a score is attached
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        matches!(self, Self::Scored)
    }
}

impl From<String> for ScoreState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SCORED" => Self::Scored,
            "PENDING_SCORE" => Self::PendingScore,
            "UNSCORABLE" => Self::Unscorable,
            _ => Self::Other(value),
        }
    }
}

impl From<ScoreState> for String {
    fn from(state: ScoreState) -> Self {
        match state {
            ScoreState::Other(value) => value,
            known => known.as_str().to_owned(),
        }
    }
}

impl Display for ScoreState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
