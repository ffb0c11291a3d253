//! Read-through cache envelope around the vendor aggregator — the
//! pipeline entry point shared by the HTTP surface and the background
//! prewarm job.

use std::time::Duration;

use crate::aggregator::{BreakerSnapshot, VendorAggregator};
use crate::cache::OfferCache;
use crate::{BestOffer, Sku};

/// Cache-fronted best-offer lookup.
///
/// A hit returns the cached result verbatim without touching any vendor;
/// a miss runs the full fan-out and stores whatever it produced —
/// out-of-stock verdicts included — under the same TTL.
pub struct OfferService {
    aggregator: VendorAggregator,
    cache: OfferCache,
}

impl OfferService {
    pub fn new(aggregator: VendorAggregator, cache: OfferCache) -> Self {
        Self { aggregator, cache }
    }

    pub fn with_cache_ttl(aggregator: VendorAggregator, cache_ttl: Duration) -> Self {
        Self::new(aggregator, OfferCache::new(cache_ttl))
    }

    pub async fn get_best_offer(&self, sku: &Sku) -> BestOffer {
        if let Some(cached) = self.cache.get(sku.as_str()).await {
            tracing::debug!(sku = sku.as_str(), "cache hit");
            return cached;
        }

        tracing::debug!(sku = sku.as_str(), "cache miss, querying vendors");
        let offer = self.aggregator.best_offer(sku).await;
        self.cache.put(sku.as_str(), offer.clone(), None).await;
        offer
    }

    /// Circuit-breaker states for metrics logging.
    pub fn vendor_health(&self) -> Vec<BreakerSnapshot> {
        self.aggregator.breaker_snapshots()
    }

    pub fn cache(&self) -> &OfferCache {
        &self.cache
    }
}
