// ABOUTME: Command modules for whoopy-cli
// ABOUTME: Authorization commands and record export commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod auth;
pub mod data;
