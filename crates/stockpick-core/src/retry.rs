//! Retry wrapper around one vendor adapter call.

use std::time::Duration;

use crate::vendor::{VendorError, VendorSource};
use crate::{Quote, Sku};

/// Backoff strategy for retrying failed vendor calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed {
        /// Delay between retries.
        delay: Duration,
    },
    /// Uses an exponential delay between retries.
    ///
    /// The delay is calculated as `base * (factor ^ attempt)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
        /// Whether to apply random jitter (+/- 50%) to the delay.
        jitter: bool,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(100),
            factor: 2.0,
            max: Duration::from_secs(2),
            jitter: true,
        }
    }
}

impl Backoff {
    /// Calculate the delay for a given retry attempt (0-based).
    pub fn delay(self, attempt: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let scale = factor.powi(attempt as i32);
                let seconds = base.as_secs_f64() * scale;
                let capped_seconds = seconds.min(max.as_secs_f64());

                let mut delay = Duration::from_secs_f64(capped_seconds);

                if jitter {
                    let jitter_ms = (delay.as_millis() as f64 * 0.5) as u64;
                    let random_offset = fastrand::u64(0..=(jitter_ms * 2));
                    let total_ms =
                        delay.as_millis() as i64 + (random_offset as i64 - jitter_ms as i64);
                    delay = Duration::from_millis(total_ms.max(0) as u64);
                }

                delay
            }
        }
    }

    /// Upper bound of a single delay, jitter included.
    pub fn max_delay(self) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential { max, jitter, .. } => {
                if jitter {
                    max + max / 2
                } else {
                    max
                }
            }
        }
    }
}

/// Configuration for the retry wrapper around one adapter call.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// The maximum number of retries to attempt.
    /// Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// Timeout applied independently to every attempt.
    pub per_call_timeout: Duration,
    /// The backoff strategy to use between attempts.
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            per_call_timeout: Duration::from_secs(2),
            backoff: Backoff::default(),
        }
    }
}

impl RetryConfig {
    pub fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Fixed { delay },
            ..Self::default()
        }
    }

    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub const fn attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Worst-case latency of the whole retry schedule: every attempt
    /// exhausting its timeout plus every backoff gap at its upper bound.
    pub fn worst_case_latency(&self) -> Duration {
        self.per_call_timeout * self.attempts() + self.backoff.max_delay() * self.max_retries
    }
}

/// Calls `source.fetch(sku)` with up to `attempts` sequential tries, each
/// under its own per-attempt timeout.
///
/// Non-retryable errors (a vendor answering with a malformed payload will
/// answer the same way again) end the loop immediately. Exhausting all
/// attempts surfaces the last unavailability.
pub async fn fetch_with_retry(
    source: &dyn VendorSource,
    sku: &Sku,
    config: &RetryConfig,
) -> Result<Quote, VendorError> {
    let vendor = source.id();
    let mut last_error = VendorError::unavailable(format!("{vendor} was never attempted"));

    for attempt in 0..config.attempts() {
        if attempt > 0 {
            tokio::time::sleep(config.backoff.delay(attempt - 1)).await;
        }

        match tokio::time::timeout(config.per_call_timeout, source.fetch(sku)).await {
            Ok(Ok(quote)) => return Ok(quote),
            Ok(Err(error)) if !error.retryable() => return Err(error),
            Ok(Err(error)) => {
                tracing::debug!(
                    vendor = vendor.as_str(),
                    attempt = attempt + 1,
                    "vendor call failed: {}",
                    error.message()
                );
                last_error = error;
            }
            Err(_) => {
                tracing::debug!(
                    vendor = vendor.as_str(),
                    attempt = attempt + 1,
                    timeout_ms = config.per_call_timeout.as_millis() as u64,
                    "vendor call timed out"
                );
                last_error = VendorError::unavailable(format!(
                    "{vendor} timed out after {}ms",
                    config.per_call_timeout.as_millis()
                ));
            }
        }
    }

    Err(last_error)
}
