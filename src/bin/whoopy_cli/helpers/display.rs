// ABOUTME: Output formatting helpers for whoopy-cli
// ABOUTME: Token summaries without secrets, profile summary and JSON record dumps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use whoopy::models::{UserBasicProfile, UserBodyMeasurement};
use whoopy::TokenInfo;

/// Token expiry and scopes; the token itself is never printed
pub fn display_token(token: &TokenInfo) {
    println!("Token stored.");
    match token.expires_at() {
        Some(expires_at) => println!("   Expires: {}", expires_at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("   Expires: unknown"),
    }
    println!(
        "   Refresh token: {}",
        if token.can_refresh() { "yes" } else { "no" }
    );
    println!("   Scopes: {}", token.scopes.join(" "));
}

/// One-screen summary of the user
pub fn display_profile(profile: &UserBasicProfile, body: &UserBodyMeasurement) {
    println!("{} {} <{}>", profile.first_name, profile.last_name, profile.email);
    println!("   User ID: {}", profile.user_id);
    println!("   Height: {:.2} m", body.height_meter);
    println!("   Weight: {:.1} kg", body.weight_kilogram);
    println!("   Max heart rate: {} bpm", body.max_heart_rate);
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
