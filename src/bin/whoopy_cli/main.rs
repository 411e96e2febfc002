// ABOUTME: whoopy-cli - command-line access to the WHOOP developer API
// ABOUTME: Runs the OAuth flow, refreshes tokens and dumps profile and collection records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Authorize and store a token in .whoop_credentials.json
//! whoopy-cli auth
//!
//! # Refresh the stored token
//! whoopy-cli refresh
//!
//! # Show the user profile and body measurements
//! whoopy-cli profile
//!
//! # Dump the last 20 recoveries as JSON
//! whoopy-cli recovery --max 20
//!
//! # Running workouts since the start of the year
//! whoopy-cli workouts --start 2025-01-01 --sport running
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use whoopy::constants::files::{DEFAULT_CONFIG_PATH, DEFAULT_TOKEN_PATH};
use whoopy::logging::LoggingConfig;
use whoopy::{BlockingWhoopClient, ListParams};

use helpers::time::parse_time;

#[derive(Parser)]
#[command(
    name = "whoopy-cli",
    about = "WHOOP developer API client",
    long_about = "Authorize against the WHOOP API and export profile, cycle, sleep, recovery and workout records."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to the client credentials file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Path to the stored token
    #[arg(long, global = true, default_value = DEFAULT_TOKEN_PATH)]
    token_file: PathBuf,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run the authorization flow and store the token
    Auth {
        /// OAuth state parameter (at least 8 characters; random if omitted)
        #[arg(long)]
        state: Option<String>,
    },

    /// Refresh the stored token
    Refresh,

    /// Show the user profile and body measurements
    Profile,

    /// List physiological cycles
    Cycles(RangeArgs),

    /// List sleep activities
    Sleep(RangeArgs),

    /// List recovery scores
    Recovery(RangeArgs),

    /// List workouts
    Workouts {
        #[command(flatten)]
        range: RangeArgs,

        /// Only workouts of this sport, ignoring case
        #[arg(long)]
        sport: Option<String>,
    },
}

#[derive(Args)]
struct RangeArgs {
    /// Earliest start time (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_time)]
    start: Option<DateTime<Utc>>,

    /// Latest start time (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_time)]
    end: Option<DateTime<Utc>>,

    /// Maximum number of records
    #[arg(long)]
    max: Option<usize>,

    /// Records per request (1-25)
    #[arg(long)]
    page_size: Option<u32>,
}

impl RangeArgs {
    fn to_params(&self) -> ListParams {
        ListParams {
            start: self.start,
            end: self.end,
            page_size: self.page_size,
            next_token: None,
            max_records: self.max,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = if cli.verbose {
        LoggingConfig::from_env().with_level("debug")
    } else {
        LoggingConfig::from_env()
    };
    logging.init()?;

    let client = BlockingWhoopClient::from_config(&cli.config, &cli.token_file)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    debug!(token_state = ?client.token_state(), "client ready");

    match cli.command {
        Command::Auth { state } => {
            commands::auth::authorize(&client, state.as_deref(), &cli.token_file)
        }
        Command::Refresh => commands::auth::refresh(&client, &cli.token_file),
        Command::Profile => commands::data::profile(&client),
        Command::Cycles(range) => commands::data::cycles(&client, range.to_params()),
        Command::Sleep(range) => commands::data::sleep(&client, range.to_params()),
        Command::Recovery(range) => commands::data::recovery(&client, range.to_params()),
        Command::Workouts { range, sport } => {
            commands::data::workouts(&client, range.to_params(), sport.as_deref())
        }
    }?;

    // Refreshes during data commands replace the held token
    if client.token_info().is_some() {
        client.save_token(&cli.token_file)?;
    }
    Ok(())
}
