// ABOUTME: Retry policy with exponential backoff for classified WHOOP API failures
// ABOUTME: Pure backoff calculator, injectable jitter sources, and an async retry executor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Retry
//!
//! [`backoff_delay`] is a pure function of the attempt number, the configuration,
//! an optional server hint and a [`JitterSource`]. [`RetryPolicy`] wraps any
//! fallible async operation and re-invokes it while the failure's category is in
//! [`RetryConfig::retry_on`] and attempts remain.

use std::env;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::time::sleep;
use tracing::warn;

use crate::constants::retry::{
    DEFAULT_BASE_DELAY_MS, DEFAULT_EXPONENTIAL_BASE, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_DELAY_MS,
    ENV_BASE_DELAY_MS, ENV_MAX_ATTEMPTS, ENV_MAX_DELAY_MS, JITTER_HIGH, JITTER_LOW,
};
use crate::errors::{CategorySet, WhoopResult};

/// Immutable retry policy parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total attempts including the first call; never below 1
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Ceiling applied to every computed delay
    pub max_delay: Duration,
    /// Growth factor between consecutive delays
    pub exponential_base: f64,
    /// Whether delays are randomized
    pub jitter: bool,
    /// Failure categories that are retried
    pub retry_on: CategorySet,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_MAX_DELAY_MS),
            exponential_base: DEFAULT_EXPONENTIAL_BASE,
            jitter: true,
            retry_on: CategorySet::transient(),
        }
    }
}

impl RetryConfig {
    /// Policy that never retries
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Defaults overlaid with `WHOOP_RETRY_*` environment variables
    ///
    /// Unparseable values are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(attempts) = env_number::<u32>(ENV_MAX_ATTEMPTS) {
            config = config.with_max_attempts(attempts);
        }
        if let Some(ms) = env_number::<u64>(ENV_BASE_DELAY_MS) {
            config.base_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = env_number::<u64>(ENV_MAX_DELAY_MS) {
            config.max_delay = Duration::from_millis(ms);
        }
        config
    }

    /// Set the attempt budget, clamped to at least one
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Set the base delay
    #[must_use]
    pub const fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Set the delay ceiling
    #[must_use]
    pub const fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Set the exponential growth factor
    #[must_use]
    pub const fn with_exponential_base(mut self, exponential_base: f64) -> Self {
        self.exponential_base = exponential_base;
        self
    }

    /// Enable or disable jitter
    #[must_use]
    pub const fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Replace the retryable category set
    #[must_use]
    pub const fn with_retry_on(mut self, retry_on: CategorySet) -> Self {
        self.retry_on = retry_on;
        self
    }
}

fn env_number<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring invalid retry override");
            None
        }
    }
}

/// Source of uniform random samples for jitter
pub trait JitterSource: Send {
    /// Sample uniformly from `[low, high]`
    fn sample(&mut self, low: f64, high: f64) -> f64;
}

/// Thread-local OS-seeded randomness
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl JitterSource for RandomJitter {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Deterministic jitter from a seeded `ChaCha8` generator
#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: ChaCha8Rng,
}

impl SeededJitter {
    /// Generator seeded with `seed`
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl JitterSource for SeededJitter {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Always returns the point `fraction` of the way from `low` to `high`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedJitter {
    /// Position in the window, 0.0 = low, 1.0 = high
    pub fraction: f64,
}

impl FixedJitter {
    /// Always sample the lower bound
    pub const LOW: Self = Self { fraction: 0.0 };
    /// Always sample the upper bound
    pub const HIGH: Self = Self { fraction: 1.0 };
}

impl JitterSource for FixedJitter {
    fn sample(&mut self, low: f64, high: f64) -> f64 {
        (high - low).mul_add(self.fraction.clamp(0.0, 1.0), low)
    }
}

/// Delay before retry number `attempt` (0 for the first retry)
///
/// With a server hint the delay is the hint plus up to one second of jitter;
/// otherwise `base_delay * exponential_base^attempt` scaled by a factor in
/// `[0.8, 1.2]` when jitter is enabled. The result never exceeds `max_delay`.
#[must_use]
pub fn backoff_delay(
    attempt: u32,
    config: &RetryConfig,
    server_hint: Option<u64>,
    jitter: &mut dyn JitterSource,
) -> Duration {
    let secs = match server_hint {
        Some(hint) => {
            let delay = hint as f64;
            if config.jitter {
                delay + jitter.sample(0.0, 1.0)
            } else {
                delay
            }
        }
        None => {
            let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
            let delay = config.base_delay.as_secs_f64() * config.exponential_base.powi(exponent);
            if config.jitter {
                delay * jitter.sample(JITTER_LOW, JITTER_HIGH)
            } else {
                delay
            }
        }
    };

    let max = config.max_delay.as_secs_f64();
    let capped = if secs.is_finite() {
        secs.clamp(0.0, max)
    } else {
        max
    };
    Duration::try_from_secs_f64(capped).map_or(config.max_delay, |d| d.min(config.max_delay))
}

/// Executes async operations under a [`RetryConfig`]
pub struct RetryPolicy {
    config: RetryConfig,
    jitter: Mutex<Box<dyn JitterSource>>,
}

impl RetryPolicy {
    /// Policy using OS randomness for jitter
    #[must_use]
    pub fn new(config: RetryConfig) -> Self {
        Self::with_jitter_source(config, Box::new(RandomJitter))
    }

    /// Policy using a caller-supplied jitter source
    #[must_use]
    pub fn with_jitter_source(config: RetryConfig, jitter: Box<dyn JitterSource>) -> Self {
        Self {
            config,
            jitter: Mutex::new(jitter),
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Delay for `attempt` using this policy's jitter source
    #[must_use]
    pub fn delay_for(&self, attempt: u32, server_hint: Option<u64>) -> Duration {
        let mut jitter = self.jitter.lock().unwrap_or_else(PoisonError::into_inner);
        backoff_delay(attempt, &self.config, server_hint, jitter.as_mut())
    }

    /// Run `operation`, retrying retryable failures until the budget is spent
    ///
    /// The sleep between attempts yields to the runtime, and dropping the
    /// returned future cancels the pending wait.
    ///
    /// # Errors
    ///
    /// Returns the first non-retryable failure, or the last failure once all
    /// attempts are exhausted
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> WhoopResult<T>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = WhoopResult<T>> + Send,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt: u32 = 0;
        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            let retryable = self.config.retry_on.includes(error.category());
            if !retryable || attempt + 1 >= max_attempts {
                if retryable {
                    warn!(
                        category = error.category().as_str(),
                        attempts = attempt + 1,
                        "retry budget exhausted"
                    );
                }
                return Err(error);
            }

            let delay = self.delay_for(attempt, error.retry_after());
            warn!(
                category = error.category().as_str(),
                attempt = attempt + 1,
                max_attempts,
                delay_ms = delay.as_millis(),
                "retrying after transient failure"
            );
            sleep(delay).await;
            attempt += 1;
        }
    }
}

impl Debug for RetryPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}
