// ABOUTME: Tests for backoff delay calculation
// ABOUTME: Ceiling, server hints, exponential growth and jitter windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::time::Duration;

use whoopy::retry::{backoff_delay, FixedJitter, RetryConfig, SeededJitter};

fn assert_close(actual: Duration, expected: Duration) {
    let diff = if actual > expected {
        actual - expected
    } else {
        expected - actual
    };
    assert!(diff < Duration::from_micros(1), "{actual:?} != {expected:?}");
}

#[test]
fn test_delay_never_exceeds_max_delay() {
    let config = RetryConfig::default();
    let mut jitter = SeededJitter::new(7);
    for attempt in 0..64 {
        let delay = backoff_delay(attempt, &config, None, &mut jitter);
        assert!(delay <= config.max_delay, "attempt {attempt}: {delay:?}");
    }
    // Large exponents overflow to infinity and still land on the ceiling
    assert_eq!(
        backoff_delay(u32::MAX, &config, None, &mut jitter),
        config.max_delay
    );
}

#[test]
fn test_server_hint_is_a_lower_bound() {
    let config = RetryConfig::default();
    let mut jitter = SeededJitter::new(99);
    for hint in [0_u64, 1, 2, 10, 59] {
        for attempt in 0..5 {
            let delay = backoff_delay(attempt, &config, Some(hint), &mut jitter);
            assert!(delay >= Duration::from_secs(hint), "hint {hint}: {delay:?}");
            assert!(delay <= config.max_delay);
            assert!(delay <= Duration::from_secs(hint + 1));
        }
    }
}

#[test]
fn test_server_hint_above_ceiling_is_capped() {
    let config = RetryConfig::default().with_max_delay(Duration::from_secs(5));
    let delay = backoff_delay(0, &config, Some(120), &mut FixedJitter::LOW);
    assert_eq!(delay, Duration::from_secs(5));
}

#[test]
fn test_exponential_growth_without_jitter() {
    let config = RetryConfig::default().with_jitter(false);
    let mut jitter = FixedJitter::HIGH;
    let delays: Vec<Duration> = (0..4)
        .map(|attempt| backoff_delay(attempt, &config, None, &mut jitter))
        .collect();
    assert_eq!(
        delays,
        vec![
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(4),
            Duration::from_secs(8),
        ]
    );
}

#[test]
fn test_jitter_window_scales_delay() {
    let config = RetryConfig::default();
    let low = backoff_delay(1, &config, None, &mut FixedJitter::LOW);
    let high = backoff_delay(1, &config, None, &mut FixedJitter::HIGH);
    assert_close(low, Duration::from_millis(1600));
    assert_close(high, Duration::from_millis(2400));

    let mut seeded = SeededJitter::new(3);
    for _ in 0..50 {
        let delay = backoff_delay(1, &config, None, &mut seeded);
        assert!(
            delay >= Duration::from_millis(1599) && delay <= Duration::from_millis(2401),
            "{delay:?}"
        );
    }
}

#[test]
fn test_hint_without_jitter_is_exact() {
    let config = RetryConfig::default().with_jitter(false);
    let delay = backoff_delay(3, &config, Some(2), &mut FixedJitter::HIGH);
    assert_eq!(delay, Duration::from_secs(2));
}
