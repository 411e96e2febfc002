// ABOUTME: Logging configuration and tracing subscriber setup for the client and CLI
// ABOUTME: Configures level, output format and dependency noise filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging setup
//!
//! The library itself only emits `tracing` events. Applications that want to see
//! them call [`LoggingConfig::init`] once at startup.

use std::env;
use std::fmt::{self, Display, Formatter};
use std::io;

use tracing::level_filters::LevelFilter;
use tracing::{debug, Level};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as subscriber_fmt, registry, EnvFilter};

use crate::errors::{WhoopError, WhoopResult};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// `JSON` lines for machine consumption
    Json,
    /// Multi-line human readable output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
}

impl LogFormat {
    /// Parse a format name, falling back to `Pretty`
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
            Self::Compact => "compact",
        })
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `whoopy=debug`
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Emit span open/close events
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Pretty,
            include_spans: false,
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from `RUST_LOG`, `LOG_FORMAT` and `LOG_INCLUDE_SPANS`
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.format),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
        }
    }

    /// Same configuration with a different level
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Filter built from `level` with HTTP stack noise held at `warn`
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(&self.level);
        ["hyper=warn", "hyper_util=warn", "reqwest=warn", "rustls=warn"]
            .into_iter()
            .fold(filter, |filter, directive| {
                filter.add_directive(
                    directive
                        .parse::<Directive>()
                        .unwrap_or_else(|_| Level::WARN.into()),
                )
            })
    }

    /// Install the global tracing subscriber, writing to stderr
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if a global subscriber is already installed
    pub fn init(&self) -> WhoopResult<()> {
        let spans = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let registry = registry().with(self.env_filter());

        let result = match self.format {
            LogFormat::Json => registry
                .with(
                    subscriber_fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_events(spans)
                        .with_writer(io::stderr),
                )
                .try_init(),
            LogFormat::Pretty => registry
                .with(
                    subscriber_fmt::layer()
                        .with_target(true)
                        .with_span_events(spans)
                        .with_writer(io::stderr),
                )
                .try_init(),
            LogFormat::Compact => registry
                .with(
                    subscriber_fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_span_events(FmtSpan::NONE)
                        .with_writer(io::stderr),
                )
                .try_init(),
        };
        result.map_err(|e| WhoopError::configuration(format!("failed to install logger: {e}")))?;

        debug!(level = %self.level, format = %self.format, "logging initialized");
        Ok(())
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> WhoopResult<()> {
    LoggingConfig::from_env().init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Pretty);
    }

    #[test]
    fn test_env_filter_keeps_requested_level() {
        let filter = LoggingConfig::default().with_level("whoopy=debug").env_filter();
        let rendered = filter.to_string();
        assert!(rendered.contains("whoopy=debug"));
        assert!(rendered.contains("reqwest=warn"));
    }
}
