// Shared helpers for the behavior-driven integration tests: a scripted
// stub vendor that stands in for the three real adapters.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub use std::sync::Arc;

pub use stockpick_core::{
    AggregatorConfig, Availability, Backoff, BestOffer, CircuitBreakerConfig, CircuitState,
    FixedWindowLimiter, OfferCache, OfferService, Quote, RateLimitConfig, RetryConfig, Sku,
    UtcDateTime, VendorAggregator, VendorError, VendorErrorKind, VendorId, VendorSource,
};

/// One scripted adapter outcome.
#[derive(Debug, Clone)]
pub enum StubOutcome {
    /// A normalized quote, fresh as of the call.
    Quote { price: f64, stock: u32 },
    /// A quote observed `age_secs` ago, for freshness tests.
    AgedQuote {
        price: f64,
        stock: u32,
        age_secs: i64,
    },
    /// Adapter-level failure.
    Fail(VendorError),
    /// Sleeps longer than any sane per-attempt timeout, then fails.
    Hang(Duration),
}

/// Scripted in-memory vendor. Outcomes are consumed in order; the last
/// one repeats once the script is exhausted.
pub struct StubVendor {
    vendor: VendorId,
    script: Mutex<VecDeque<StubOutcome>>,
    fallback: StubOutcome,
    calls: AtomicU32,
}

impl StubVendor {
    pub fn scripted(vendor: VendorId, outcomes: Vec<StubOutcome>) -> Arc<Self> {
        let fallback = outcomes
            .last()
            .cloned()
            .unwrap_or(StubOutcome::Fail(VendorError::unavailable("empty script")));
        Arc::new(Self {
            vendor,
            script: Mutex::new(outcomes.into()),
            fallback,
            calls: AtomicU32::new(0),
        })
    }

    pub fn always_ok(vendor: VendorId, price: f64, stock: u32) -> Arc<Self> {
        Self::scripted(vendor, vec![StubOutcome::Quote { price, stock }])
    }

    pub fn always_failing(vendor: VendorId, error: VendorError) -> Arc<Self> {
        Self::scripted(vendor, vec![StubOutcome::Fail(error)])
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn next_outcome(&self) -> StubOutcome {
        self.script
            .lock()
            .expect("stub script lock is not poisoned")
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn quote(&self, sku: &Sku, price: f64, stock: u32, age_secs: i64) -> Quote {
        let status = if stock > 0 {
            Availability::InStock
        } else {
            Availability::OutOfStock
        };
        let observed_at = UtcDateTime::from_offset_datetime(
            time::OffsetDateTime::now_utc() - time::Duration::seconds(age_secs),
        )
        .expect("still UTC");

        Quote::new(self.vendor, sku.clone(), price, stock, status, observed_at)
            .expect("stub quotes are valid")
    }
}

impl VendorSource for StubVendor {
    fn id(&self) -> VendorId {
        self.vendor
    }

    fn fetch<'a>(
        &'a self,
        sku: &'a Sku,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, VendorError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.next_outcome() {
                StubOutcome::Quote { price, stock } => Ok(self.quote(sku, price, stock, 0)),
                StubOutcome::AgedQuote {
                    price,
                    stock,
                    age_secs,
                } => Ok(self.quote(sku, price, stock, age_secs)),
                StubOutcome::Fail(error) => Err(error),
                StubOutcome::Hang(duration) => {
                    tokio::time::sleep(duration).await;
                    Err(VendorError::unavailable("hung vendor finally gave up"))
                }
            }
        })
    }
}

/// Aggregator config with short timeouts so failure paths stay fast.
pub fn fast_aggregator_config() -> AggregatorConfig {
    AggregatorConfig {
        retry: RetryConfig {
            max_retries: 0,
            per_call_timeout: Duration::from_millis(100),
            backoff: Backoff::Fixed {
                delay: Duration::from_millis(1),
            },
        },
        breaker: CircuitBreakerConfig::default(),
        freshness_cutoff: Duration::from_secs(600),
    }
}

pub fn test_sku() -> Sku {
    Sku::parse("ABC123").expect("valid sku")
}
