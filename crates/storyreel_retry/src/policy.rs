//! Retry policies and the shared retry combinator.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use storyreel_error::{ExhaustedRetryError, RetryableError, StoryreelResult};
use tokio_retry2::strategy::{ExponentialBackoff, FixedInterval, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, warn};

/// How the delay grows between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Backoff {
    /// Same delay every time
    #[default]
    Fixed,
    /// Growing delay with jitter, capped at `max_delay_ms`
    Exponential,
}

/// Bounds for one retried operation.
///
/// `max_attempts` counts the first try, so a policy of 3 makes at most
/// 3 calls and sleeps at most twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total calls allowed, including the first
    pub max_attempts: usize,
    /// Delay before each retry, in milliseconds
    #[serde(default)]
    pub delay_ms: u64,
    /// Delay growth
    #[serde(default)]
    pub backoff: Backoff,
    /// Cap for exponential backoff, in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_delay_ms() -> u64 {
    60_000
}

impl RetryPolicy {
    /// Fixed-delay policy.
    pub fn fixed(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay_ms: delay.as_millis() as u64,
            backoff: Backoff::Fixed,
            max_delay_ms: default_max_delay_ms(),
        }
    }

    /// Retry immediately with no delay.
    pub fn immediate(max_attempts: usize) -> Self {
        Self::fixed(max_attempts, Duration::ZERO)
    }

    /// Worst-case time spent sleeping between attempts.
    pub fn max_total_delay(&self) -> Duration {
        let retries = self.max_attempts.saturating_sub(1) as u64;
        match self.backoff {
            Backoff::Fixed => Duration::from_millis(self.delay_ms * retries),
            Backoff::Exponential => Duration::from_millis(self.max_delay_ms * retries),
        }
    }

    fn strategy(&self) -> Box<dyn Iterator<Item = Duration> + Send> {
        let retries = self.max_attempts.saturating_sub(1);
        match self.backoff {
            Backoff::Fixed => Box::new(FixedInterval::from_millis(self.delay_ms).take(retries)),
            Backoff::Exponential => Box::new(
                ExponentialBackoff::from_millis(self.delay_ms.max(1))
                    .factor(2)
                    .max_delay(Duration::from_millis(self.max_delay_ms))
                    .map(jitter)
                    .take(retries),
            ),
        }
    }
}

/// Run `action` until it succeeds, fails permanently, or runs out of attempts.
///
/// Errors whose [`RetryableError::is_retryable`] is false are returned
/// immediately. A retryable error on the last attempt becomes an
/// [`ExhaustedRetryError`] naming `operation`.
///
/// # Example
///
/// ```rust,ignore
/// let job_id = retry(&config.retry.image_submit, "image submit", || async {
///     images.submit(&request).await
/// })
/// .await?;
/// ```
pub async fn retry<F, Fut, T>(
    policy: &RetryPolicy,
    operation: &str,
    mut action: F,
) -> StoryreelResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = StoryreelResult<T>>,
{
    let attempts = AtomicUsize::new(0);
    let max_attempts = policy.max_attempts.max(1);

    let result = Retry::spawn(policy.strategy(), || {
        let attempt = attempts.fetch_add(1, Ordering::Relaxed) + 1;
        let fut = action();
        async move {
            match fut.await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation, attempt, "Succeeded after retry");
                    }
                    Ok(value)
                }
                Err(e) if e.is_retryable() => {
                    warn!(operation, attempt, max_attempts, error = %e, "Transient error, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(operation, attempt, error = %e, "Permanent error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        }
    })
    .await;

    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_retryable() => Err(ExhaustedRetryError::new(
            operation,
            attempts.load(Ordering::Relaxed),
            e.to_string(),
        )
        .into()),
        Err(e) => Err(e),
    }
}
