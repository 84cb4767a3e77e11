//! Suspension used between retry attempts.

use async_trait::async_trait;
use std::time::Duration;

/// Cooperative delay between retries.
///
/// Kept behind a trait so tests can observe backoff delays without waiting on a clock.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
