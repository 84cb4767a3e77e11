//! Exponential backoff retry policy with jitter.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::*;
use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::classifier::ErrorClassifier;
use crate::traits::sleeper::{Sleeper, TokioSleeper};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_MAX_JITTER: Duration = Duration::from_millis(1000);

/// Outcome of a single failed attempt.
#[derive(Debug)]
pub struct RetryAttempt<'a, E> {
    /// 1-based attempt index.
    pub attempt: u32,
    pub error: &'a E,
    pub retry_permitted: bool,
}

impl<E: fmt::Display> fmt::Display for RetryAttempt<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "attempt {} failed ({}), retry {}",
            self.attempt,
            self.error,
            if self.retry_permitted {
                "permitted"
            } else {
                "not permitted"
            }
        )
    }
}

/// Retries a fallible async operation with exponentially increasing delays.
///
/// The delay before retry `n` (counting the first attempt as 1) is
/// `base_delay * 2^(n-1)` plus a uniformly random jitter in `[0, max_jitter]`.
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_jitter: Duration,
    sleeper: Arc<dyn Sleeper>,
    cancellation: Option<CancellationToken>,
}

impl RetryPolicy {
    /// Create a new retry policy.
    ///
    /// # Arguments
    ///
    /// * `max_attempts` - Total number of attempts, including the first one (at least 1)
    /// * `base_delay` - Delay before the first retry, doubled for each one after it
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_jitter: DEFAULT_MAX_JITTER,
            sleeper: Arc::new(TokioSleeper),
            cancellation: None,
        }
    }

    /// Set the upper bound of the random jitter added to each delay.
    pub fn with_max_jitter(mut self, max_jitter: Duration) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    /// Replace the timer used between attempts.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Stop retrying once the token is cancelled.
    ///
    /// A cancellation observed during a backoff pause ends the loop with the
    /// most recent error. An attempt already in flight is not interrupted.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn max_jitter(&self) -> Duration {
        self.max_jitter
    }

    /// Backoff delay following a failed `attempt`, before jitter.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        self.base_delay
            .saturating_mul(2_u32.saturating_pow(exponent))
    }

    /// Decide whether a failure on `attempt` may be followed by another attempt.
    ///
    /// The final attempt is never retried, so the classifier is only consulted
    /// while attempts remain.
    pub fn assess<'a, E, C>(&self, attempt: u32, error: &'a E, classifier: &C) -> RetryAttempt<'a, E>
    where
        C: ErrorClassifier<E> + ?Sized,
    {
        let retry_permitted = attempt < self.max_attempts && classifier.is_retryable(error);
        RetryAttempt {
            attempt,
            error,
            retry_permitted,
        }
    }

    /// Run `operation` until it succeeds, fails permanently, or attempts run out.
    ///
    /// Returns the first success, or the error of the last attempt made.
    pub async fn run<T, E, C, F, Fut>(&self, classifier: &C, mut operation: F) -> Result<T, E>
    where
        E: fmt::Display,
        C: ErrorClassifier<E> + ?Sized,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 1;
        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            let outcome = self.assess(attempt, &error, classifier);
            if !outcome.retry_permitted {
                debug!("Giving up: {}", outcome);
                return Err(error);
            }

            let delay = self.backoff_delay(attempt) + self.jitter();
            warn!(
                "Attempt {} failed, retrying in {}ms: {}",
                attempt,
                delay.as_millis(),
                error
            );

            if !self.pause(delay).await {
                warn!("Retry cancelled after attempt {}", attempt);
                return Err(error);
            }
            attempt += 1;
        }
    }

    fn jitter(&self) -> Duration {
        let max_ms = self.max_jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
    }

    /// Wait out `delay`. Returns false if cancellation interrupted the wait.
    async fn pause(&self, delay: Duration) -> bool {
        match &self.cancellation {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => false,
                    _ = self.sleeper.sleep(delay) => true,
                }
            }
            None => {
                self.sleeper.sleep(delay).await;
                true
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_BASE_DELAY)
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .field("max_jitter", &self.max_jitter)
            .field("cancellable", &self.cancellation.is_some())
            .finish()
    }
}
