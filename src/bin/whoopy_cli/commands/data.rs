// ABOUTME: Record export commands for whoopy-cli
// ABOUTME: Fetches profile and collection records and prints them as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use tracing::info;
use whoopy::{BlockingWhoopClient, ListParams};

use crate::helpers::display::{display_profile, print_json};

/// Profile and body measurements
pub fn profile(client: &BlockingWhoopClient) -> Result<()> {
    let profile = client.user().get_profile()?;
    let body = client.user().get_body_measurements()?;
    display_profile(&profile, &body);
    Ok(())
}

/// Cycles in range
pub fn cycles(client: &BlockingWhoopClient, params: ListParams) -> Result<()> {
    let records = client.cycles().get_all(params)?;
    info!(count = records.len(), "fetched cycles");
    print_json(&records)
}

/// Sleeps in range
pub fn sleep(client: &BlockingWhoopClient, params: ListParams) -> Result<()> {
    let records = client.sleep().get_all(params)?;
    info!(count = records.len(), "fetched sleeps");
    print_json(&records)
}

/// Recoveries in range
pub fn recovery(client: &BlockingWhoopClient, params: ListParams) -> Result<()> {
    let records = client.recovery().get_all(params)?;
    info!(count = records.len(), "fetched recoveries");
    print_json(&records)
}

/// Workouts in range, optionally of one sport
pub fn workouts(client: &BlockingWhoopClient, params: ListParams, sport: Option<&str>) -> Result<()> {
    let records = match sport {
        Some(sport) => client.workouts().get_by_sport(sport, params)?,
        None => client.workouts().get_all(params)?,
    };
    info!(count = records.len(), "fetched workouts");
    print_json(&records)
}
