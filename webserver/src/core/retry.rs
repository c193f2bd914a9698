//! Bounded retry with linear backoff for idempotent reads
//!
//! Retries are sequential; nothing is fanned out. The wrapper adds no failure
//! modes of its own: whatever the final invocation returns is what the caller
//! sees.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Scheduled retries before the final unconditional call
pub const DEFAULT_RETRIES: u32 = 3;
/// Base delay; attempt `i` waits `base * (i + 1)` before the next try
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Delay before re-running the operation after failed attempt `attempt`.
/// Linear, not exponential.
pub fn backoff_delay(base_delay: Duration, attempt: u32) -> Duration {
    base_delay * (attempt + 1)
}

/// Run `operation` up to `retries` times, sleeping between failures, then run
/// it one final time unconditionally and return that result as-is.
///
/// The effective invocation count on persistent failure is `retries + 1`: the
/// final call is never itself retried, even when it errors. Callers must treat
/// an `Err` from this function as terminal for the whole sequence.
pub async fn with_retry<T, E, F, Fut>(
    mut operation: F,
    retries: u32,
    base_delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    for attempt in 0..retries {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                let delay = backoff_delay(base_delay, attempt);
                warn!(
                    "Attempt {} of {} failed: {}. Retrying in {:?}",
                    attempt + 1,
                    retries,
                    error,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }

    operation().await
}
