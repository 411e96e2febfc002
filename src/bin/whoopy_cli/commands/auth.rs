// ABOUTME: Authorization commands for whoopy-cli
// ABOUTME: Interactive code exchange through a pasted redirect URL, and forced refresh
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use whoopy::oauth2_client::extract_code;
use whoopy::BlockingWhoopClient;

use crate::helpers::display::display_token;

/// Print the authorization URL, read the redirect back and store the token
pub fn authorize(client: &BlockingWhoopClient, state: Option<&str>, token_file: &Path) -> Result<()> {
    let url = client.authorization_url(state)?;

    println!("Open this URL in a browser and approve access:\n");
    println!("{url}\n");
    print!("Paste the full redirect URL: ");
    io::stdout().flush()?;

    let mut redirect = String::new();
    io::stdin()
        .lock()
        .read_line(&mut redirect)
        .context("reading redirect URL")?;
    let code = extract_code(redirect.trim())?;

    let token = client.exchange_code(&code)?;
    client.save_token(token_file)?;
    info!(path = %token_file.display(), "token saved");
    display_token(&token);
    Ok(())
}

/// Refresh the stored token and save the result
pub fn refresh(client: &BlockingWhoopClient, token_file: &Path) -> Result<()> {
    let token = client
        .refresh_token()
        .context("refreshing token; run `whoopy-cli auth` if this keeps failing")?;
    client.save_token(token_file)?;
    display_token(&token);
    Ok(())
}
