// librenfc/src/utils/timeout.rs

//! Retry backoff helpers.

use std::time::Duration;

use crate::constants::DEFAULT_RETRY_BACKOFF_MS;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Default delay between retry attempts.
pub fn default_retry_backoff() -> Duration {
    ms(DEFAULT_RETRY_BACKOFF_MS)
}

/// Sleep for `backoff` on the tokio timer. A zero backoff returns
/// immediately without yielding to the timer.
pub async fn backoff(backoff: Duration) {
    if !backoff.is_zero() {
        tokio::time::sleep(backoff).await;
    }
}
