//! Concurrent fan-out to every vendor and selection of the best offer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
use crate::decision::select_best;
use crate::freshness::filter_fresh;
use crate::retry::{fetch_with_retry, RetryConfig};
use crate::vendor::{VendorError, VendorId, VendorSource};
use crate::{BestOffer, Quote, Sku, UtcDateTime};

/// Caller-facing message when no vendor produced a usable offer. Names no
/// vendor and no internal failure cause.
const NO_OFFER_MESSAGE: &str = "Product not available from any vendor";

/// Pipeline knobs consumed by the aggregator.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub retry: RetryConfig,
    pub breaker: CircuitBreakerConfig,
    /// Quotes older than this at decision time are discarded.
    pub freshness_cutoff: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            breaker: CircuitBreakerConfig::default(),
            freshness_cutoff: Duration::from_secs(600),
        }
    }
}

/// Point-in-time view of one vendor's circuit breaker, for metrics logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerSnapshot {
    pub vendor: VendorId,
    pub state: CircuitState,
    pub consecutive_failures: u32,
}

/// Fans out to all registered vendors concurrently and joins on every
/// outcome — a barrier, not a race. Individual vendor failures are
/// absorbed; the request only ever degrades to OUT_OF_STOCK.
pub struct VendorAggregator {
    sources: Vec<Arc<dyn VendorSource>>,
    breakers: HashMap<VendorId, Arc<CircuitBreaker>>,
    retry: RetryConfig,
    freshness_cutoff: Duration,
    /// Hard cap on the whole fan-out, derived from the retry schedule's
    /// own worst case. A sub-task exceeding it counts as unavailable for
    /// this request without blocking the others.
    fanout_deadline: Duration,
}

impl VendorAggregator {
    pub fn new(sources: Vec<Arc<dyn VendorSource>>, config: AggregatorConfig) -> Self {
        let breakers = sources
            .iter()
            .map(|source| {
                (
                    source.id(),
                    Arc::new(CircuitBreaker::new(config.breaker)),
                )
            })
            .collect();

        let fanout_deadline = config.retry.worst_case_latency() + Duration::from_millis(500);

        Self {
            sources,
            breakers,
            retry: config.retry,
            freshness_cutoff: config.freshness_cutoff,
            fanout_deadline,
        }
    }

    /// Queries every vendor concurrently and returns the quotes that
    /// survived: circuit-breaker rejections, retries exhausted, invalid
    /// payloads, and deadline overruns are all absorbed here.
    pub async fn collect_quotes(&self, sku: &Sku) -> Vec<Quote> {
        let mut handles = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let vendor = source.id();
            let breaker = Arc::clone(
                self.breakers
                    .get(&vendor)
                    .expect("every source has a breaker"),
            );
            let source = Arc::clone(source);
            let retry = self.retry.clone();
            let sku = sku.clone();

            handles.push((
                vendor,
                tokio::spawn(async move {
                    if !breaker.allow_request() {
                        // Gate rejection: no outbound call, no breaker mutation.
                        return Err(VendorError::circuit_open(vendor));
                    }

                    match fetch_with_retry(source.as_ref(), &sku, &retry).await {
                        Ok(quote) => {
                            breaker.record_success();
                            Ok(quote)
                        }
                        Err(error) => {
                            breaker.record_failure();
                            Err(error)
                        }
                    }
                }),
            ));
        }

        let deadline = Instant::now() + self.fanout_deadline;
        let mut quotes = Vec::with_capacity(handles.len());

        for (vendor, handle) in handles {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match tokio::time::timeout(remaining, handle).await {
                Ok(Ok(Ok(quote))) => quotes.push(quote),
                Ok(Ok(Err(error))) => {
                    tracing::warn!(
                        vendor = vendor.as_str(),
                        code = error.code(),
                        "vendor query failed: {}",
                        error.message()
                    );
                }
                Ok(Err(join_error)) => {
                    tracing::warn!(
                        vendor = vendor.as_str(),
                        "vendor query task aborted: {join_error}"
                    );
                }
                Err(_) => {
                    // The detached task keeps running; this request stops
                    // waiting and treats the vendor as unavailable.
                    tracing::warn!(
                        vendor = vendor.as_str(),
                        deadline_ms = self.fanout_deadline.as_millis() as u64,
                        "vendor query exceeded the fan-out deadline"
                    );
                }
            }
        }

        tracing::debug!(
            sku = sku.as_str(),
            responded = quotes.len(),
            queried = self.sources.len(),
            "vendor fan-out complete"
        );

        quotes
    }

    /// Full pipeline for one SKU: fan-out, freshness filter, decision.
    pub async fn best_offer(&self, sku: &Sku) -> BestOffer {
        let quotes = self.collect_quotes(sku).await;
        let fresh = filter_fresh(quotes, self.freshness_cutoff, UtcDateTime::now());

        match select_best(&fresh) {
            Some(winner) => {
                tracing::info!(
                    sku = sku.as_str(),
                    vendor = winner.vendor.as_str(),
                    price = winner.price,
                    stock = winner.stock,
                    "best offer selected"
                );
                BestOffer::in_stock(winner)
            }
            None => {
                tracing::info!(sku = sku.as_str(), "no vendor has stock");
                BestOffer::out_of_stock(sku.clone(), NO_OFFER_MESSAGE)
            }
        }
    }

    /// Breaker states for all vendors, in registration order.
    pub fn breaker_snapshots(&self) -> Vec<BreakerSnapshot> {
        self.sources
            .iter()
            .map(|source| {
                let vendor = source.id();
                let breaker = &self.breakers[&vendor];
                BreakerSnapshot {
                    vendor,
                    state: breaker.state(),
                    consecutive_failures: breaker.consecutive_failures(),
                }
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn breaker(&self, vendor: VendorId) -> &Arc<CircuitBreaker> {
        &self.breakers[&vendor]
    }
}
