//! Retry with exponential backoff and client-side request throttling

use std::future::Future;
use std::num::NonZeroU32;
use std::time::Duration;

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as GovernorLimiter};
use hawkeye_core::IngestError;
use tokio::time::sleep;
use tracing::debug;

use crate::config;

/// Retry policy configuration
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub enabled: bool,
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub multiplier: f64,
}

impl RetryPolicy {
    pub fn new(config: &config::Retry) -> Self {
        if !config.enabled {
            return Self::disabled();
        }
        Self {
            enabled: config.enabled,
            max_attempts: config.max_attempts,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            max_backoff: Duration::from_millis(config.max_backoff_ms),
            multiplier: config.multiplier,
        }
    }

    /// Single attempt, no backoff
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            multiplier: 1.0,
        }
    }

    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            current_interval: self.initial_backoff,
            initial_interval: self.initial_backoff,
            max_interval: self.max_backoff,
            multiplier: self.multiplier,
            max_elapsed_time: None,
            ..Default::default()
        }
    }
}

/// Run `f` until it succeeds, fails with a non-transient error, or the attempt budget is spent.
///
/// The last error is returned unchanged.
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, operation: &str, mut f: F) -> Result<T, IngestError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, IngestError>>,
{
    if !policy.enabled {
        return f().await;
    }

    let mut backoff = policy.create_backoff();
    let mut attempts = 0u32;

    loop {
        attempts += 1;

        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !e.is_transient() {
                    return Err(e);
                }

                if attempts >= policy.max_attempts {
                    debug!(operation, attempts, "Max retry attempts reached");
                    return Err(e);
                }

                match backoff.next_backoff() {
                    Some(delay) => {
                        debug!(
                            operation,
                            attempt = attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "Retrying after backoff"
                        );
                        sleep(delay).await;
                    }
                    None => return Err(e),
                }
            }
        }
    }
}

/// Outbound request throttle shared by every caller of one client
pub struct RateLimiter {
    inner: Option<DefaultDirectRateLimiter>,
}

impl RateLimiter {
    pub fn new(config: &config::RateLimit) -> Self {
        let inner = NonZeroU32::new(config.requests_per_second).map(|rps| {
            let burst = NonZeroU32::new(config.burst).unwrap_or(NonZeroU32::MIN);
            GovernorLimiter::direct(Quota::per_second(rps).allow_burst(burst))
        });
        Self { inner }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Wait until a request may be sent
    pub async fn acquire(&self) {
        if let Some(limiter) = &self.inner {
            limiter.until_ready().await;
        }
    }
}
