use std::future::Future;
use tracing::warn;
use crate::error::Result;
use crate::utils::time::sleep_with_jitter;

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// `retries` extra attempts are used up, in which case the last error is
/// returned. The delay doubles after each failure.
pub async fn retry_with_backoff<T, F, Fut>(
    mut retries: u32,
    base_delay_ms: u64,
    operation: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut delay = base_delay_ms;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                if retries == 0 {
                    warn!(error = %e, "Giving up after retries");
                    return Err(e);
                }

                warn!(error = %e, delay_ms = delay, "Request failed, retrying");
                retries -= 1;
                sleep_with_jitter(delay, delay / 2).await;
                delay *= 2;
            }
        }
    }
}
