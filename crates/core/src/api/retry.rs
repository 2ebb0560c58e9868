use crate::api::error::FetchResult;
use crate::config::Settings;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Fixed-delay retry policy with uniform jitter. Only errors classified as
/// retryable (see `FetchError::is_retryable`) are retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub jitter: Duration,
}

impl RetryPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_attempts: settings.retries.max(1),
            delay: settings.retry_delay,
            jitter: settings.retry_jitter,
        }
    }

    /// Single attempt, no sleeping.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    fn backoff(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.delay;
        }
        self.delay + Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
    }
}

/// Runs `op` under the policy. `what` names the call for logs.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, what: &'static str, op: F) -> FetchResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = FetchResult<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(v) => return Ok(v),
            Err(err) => {
                if !err.is_retryable() || attempt >= max_attempts {
                    return Err(err);
                }
                let backoff = policy.backoff();
                tracing::warn!(what, attempt, ?backoff, error = %err, "fetch failed; retrying");
                tokio::time::sleep(backoff).await;
            }
        }
    }
}
