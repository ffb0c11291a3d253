//! In-memory read-through cache for best-offer results.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::BestOffer;

#[derive(Debug, Clone)]
struct CacheEntry {
    offer: BestOffer,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheInner {
    map: HashMap<String, CacheEntry>,
    default_ttl: Duration,
}

impl CacheInner {
    fn new(default_ttl: Duration) -> Self {
        Self {
            map: HashMap::new(),
            default_ttl,
        }
    }

    fn get(&self, key: &str) -> Option<BestOffer> {
        self.map.get(key).and_then(|entry| {
            if Instant::now() <= entry.expires_at {
                Some(entry.offer.clone())
            } else {
                None
            }
        })
    }

    fn put(&mut self, key: String, offer: BestOffer, ttl_override: Option<Duration>) {
        let ttl = ttl_override.unwrap_or(self.default_ttl);
        let expires_at = Instant::now() + ttl;
        self.map.insert(key, CacheEntry { offer, expires_at });
    }

    fn clear_expired(&mut self) {
        let now = Instant::now();
        self.map.retain(|_, entry| entry.expires_at > now);
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// Thread-safe offer cache keyed by SKU.
///
/// Out-of-stock results are cached with the same TTL as in-stock ones so
/// persistently unavailable SKUs do not hammer the vendors. Concurrent
/// read-through races resolve last-writer-wins.
#[derive(Debug, Clone)]
pub struct OfferCache {
    inner: Arc<tokio::sync::RwLock<CacheInner>>,
}

impl OfferCache {
    /// Create a cache with a default TTL applied to every entry.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(CacheInner::new(default_ttl))),
        }
    }

    /// Create a cache with the standard 120 second TTL.
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::from_secs(120))
    }

    /// Get the cached offer for a SKU if present and not expired.
    pub async fn get(&self, sku: &str) -> Option<BestOffer> {
        let store = self.inner.read().await;
        store.get(sku)
    }

    /// Whether a non-expired entry exists for a SKU.
    pub async fn exists(&self, sku: &str) -> bool {
        let store = self.inner.read().await;
        store.get(sku).is_some()
    }

    /// Store an offer for a SKU, stamping expiry from now.
    ///
    /// If `ttl_override` is provided it is used instead of the default TTL.
    pub async fn put(&self, sku: &str, offer: BestOffer, ttl_override: Option<Duration>) {
        let mut store = self.inner.write().await;
        store.put(sku.to_owned(), offer, ttl_override);
    }

    /// Remove expired entries.
    pub async fn clear_expired(&self) {
        let mut store = self.inner.write().await;
        store.clear_expired();
    }

    /// Number of entries, expired ones included until swept.
    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
