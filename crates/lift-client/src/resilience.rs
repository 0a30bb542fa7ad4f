//! Bounded retry, exponential backoff, and request-rate limiting for
//! external calls.
//!
//! One [`ResiliencePolicy`] instance is built from configuration and injected
//! into every HTTP client, so the retry curve and the shared rate budget are
//! defined in exactly one place. The rolling rate-limit window has a single
//! writer — the policy itself — and sleeps the caller when the per-minute
//! budget is exhausted.
//!
//! Only errors that exhaust retries or are explicitly non-retryable (see
//! [`ClientError::is_retryable`]) propagate to the caller.

use crate::error::ClientError;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Retry/backoff/rate-limit policy for external calls.
#[derive(Debug, Clone)]
pub struct ResiliencePolicy {
    /// Maximum number of attempts (including the initial one).
    max_attempts: u32,
    /// Initial delay before the first retry.
    base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    max_delay: Duration,
    limiter: RateLimiter,
}

impl Default for ResiliencePolicy {
    fn default() -> Self {
        Self::new(4, Duration::from_secs(1), Duration::from_secs(30), 250)
    }
}

impl ResiliencePolicy {
    /// Build a policy from explicit limits.
    #[must_use]
    pub fn new(
        max_attempts: u32,
        base_delay: Duration,
        max_delay: Duration,
        calls_per_minute: u32,
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
            limiter: RateLimiter::new(calls_per_minute),
        }
    }

    /// Run `op` under the policy: rate-limited, retried with exponential
    /// backoff while the error is retryable and attempts remain.
    ///
    /// A 429 response waits the server-provided `Retry-After` (capped at
    /// `max_delay`) instead of the backoff curve.
    ///
    /// # Errors
    ///
    /// Returns the last [`ClientError`] once retries are exhausted, or the
    /// first non-retryable error immediately.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut backoff = self.base_delay;
        let mut attempt = 1u32;

        loop {
            self.limiter.acquire().await;

            match op().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if attempt >= self.max_attempts || !error.is_retryable() {
                        return Err(error);
                    }

                    let wait = match &error {
                        ClientError::RateLimited { retry_after_secs } => {
                            Duration::from_secs(*retry_after_secs).min(self.max_delay)
                        }
                        _ => backoff,
                    };

                    tracing::warn!(attempt, %error, wait_ms = wait.as_millis() as u64, "external call failed; backing off");
                    tokio::time::sleep(wait).await;

                    backoff = (backoff * 2).min(self.max_delay);
                    attempt += 1;
                }
            }
        }
    }
}

/// Rolling-window rate limiter: at most `capacity` calls per 60 seconds.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    stamps: Arc<Mutex<VecDeque<Instant>>>,
    capacity: usize,
    window: Duration,
}

impl RateLimiter {
    /// Build a limiter allowing `calls_per_minute` calls per rolling minute.
    #[must_use]
    pub fn new(calls_per_minute: u32) -> Self {
        Self {
            stamps: Arc::new(Mutex::new(VecDeque::new())),
            capacity: calls_per_minute.max(1) as usize,
            window: Duration::from_secs(60),
        }
    }

    /// Record one call, sleeping first if the window budget is exhausted.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut stamps = self
                    .stamps
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                let now = Instant::now();

                while stamps
                    .front()
                    .is_some_and(|t| now.duration_since(*t) >= self.window)
                {
                    stamps.pop_front();
                }

                if stamps.len() < self.capacity {
                    stamps.push_back(now);
                    None
                } else {
                    stamps
                        .front()
                        .map(|oldest| self.window - now.duration_since(*oldest))
                }
            };

            match wait {
                None => return,
                Some(duration) => tokio::time::sleep(duration).await,
            }
        }
    }
}
