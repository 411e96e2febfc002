// ABOUTME: Helper modules for whoopy-cli
// ABOUTME: Output formatting and argument parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
pub mod time;
