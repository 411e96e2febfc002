// ABOUTME: Resource accessors for the WHOOP collections and the user endpoints
// ABOUTME: Each collection handler is a page source and offers get_page, get_all and iterate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Resource handlers
//!
//! Handlers are cheap `Copy` views over a [`WhoopClient`](crate::client::WhoopClient).
//! Their methods take `self` by value, so futures only borrow the client.

/// Physiological cycles
pub mod cycles;
/// Recovery scores
pub mod recovery;
/// Sleep activities
pub mod sleep;
/// User profile and measurements
pub mod user;
/// Workouts
pub mod workouts;

pub use cycles::CycleHandler;
pub use recovery::RecoveryHandler;
pub use sleep::SleepHandler;
pub use user::UserHandler;
pub use workouts::WorkoutHandler;

use urlencoding::encode;

/// `collection/id` with the id percent-encoded as a single path segment
pub(crate) fn item_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", encode(id))
}
