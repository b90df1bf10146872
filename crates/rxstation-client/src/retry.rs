//! Backoff schedule for transient registry failures.

use rand::Rng;
use rxstation_types::models::RetryConfig;
use std::time::Duration;

/// Delay before retry number `attempt` (1-based), without jitter.
pub fn backoff_delay(retry: &RetryConfig, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    let delay = retry.base_delay_ms.saturating_mul(1u64 << exponent);
    Duration::from_millis(delay.min(retry.max_delay_ms))
}

/// [`backoff_delay`] plus up to 20% random jitter, still capped at `max_delay_ms`.
pub(crate) fn jittered_delay(retry: &RetryConfig, attempt: u32) -> Duration {
    let base = backoff_delay(retry, attempt);
    let spread = base.as_millis() as u64 / 5;
    let jitter = if spread == 0 { 0 } else { rand::thread_rng().gen_range(0..=spread) };
    Duration::from_millis((base.as_millis() as u64 + jitter).min(retry.max_delay_ms))
}
