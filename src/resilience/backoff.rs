//! Exponential backoff with jitter.

use rand::Rng;
use std::time::Duration;

use crate::config::schema::RetryConfig;

/// Delay before retry number `retry` (counted from 1) under `policy`.
///
/// Doubles from `base_delay_ms`, capped at `max_delay_ms`, plus up to 10%
/// jitter.
pub fn retry_delay(policy: &RetryConfig, retry: u32) -> Duration {
    let Some(doublings) = retry.checked_sub(1) else {
        return Duration::ZERO;
    };

    let factor = 1u64.checked_shl(doublings).unwrap_or(u64::MAX);
    let delay_ms = policy
        .base_delay_ms
        .saturating_mul(factor)
        .min(policy.max_delay_ms);

    let jitter_ms = match delay_ms / 10 {
        0 => 0,
        span => rand::thread_rng().gen_range(0..span),
    };

    Duration::from_millis(delay_ms + jitter_ms)
}
