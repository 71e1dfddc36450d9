//! Retry logic.
//!
//! # Responsibilities
//! - Re-run a failed idempotent operation a bounded number of times
//! - Wait a jittered exponential backoff between attempts
//! - Stop early on errors the caller marks as permanent
//!
//! # Design Decisions
//! - Never used for transaction submission (non-idempotent)
//! - `max_retries = 0` means exactly one attempt

use std::fmt::Display;
use std::future::Future;

use crate::config::schema::RetryConfig;
use crate::resilience::backoff::retry_delay;

/// Run `operation` until it succeeds, fails permanently, or runs out of retries.
pub async fn retry_with_backoff<T, E, F, Fut, P>(
    policy: &RetryConfig,
    name: &'static str,
    is_retryable: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < policy.max_retries && is_retryable(&e) => {
                attempt += 1;
                let delay = retry_delay(policy, attempt);
                tracing::warn!(
                    operation = name,
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Retrying after failure"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
