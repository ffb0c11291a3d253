//! Fixed-window rate limiting keyed by caller identity.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Limits for one caller key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed per window.
    pub limit: u32,
    /// Window length; the counter resets when it elapses.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: 60,
            window: Duration::from_secs(60),
        }
    }
}

/// Rejection emitted before a request reaches the cache or any vendor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rate limit exceeded: maximum {limit} requests per {window_secs} seconds")]
pub struct RateLimitError {
    pub limit: u32,
    pub window_secs: u64,
}

#[derive(Debug)]
struct Window {
    count: u32,
    window_start: Instant,
}

/// Fixed-window counter per caller key.
///
/// The map-level lock is only taken to look up or create a key's window
/// record; counting mutates the record behind its own mutex, so callers
/// with different keys never contend on one lock.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    config: RateLimitConfig,
    windows: RwLock<HashMap<String, Arc<Mutex<Window>>>>,
}

impl FixedWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: RwLock::new(HashMap::new()),
        }
    }

    /// Counts one request for `key`.
    ///
    /// Returns `Err` when the key has exhausted its window; the rejected
    /// request still consumed one count, matching fixed-window semantics
    /// (the 61st through Nth requests of a window are all rejected).
    pub fn check(&self, key: &str) -> Result<(), RateLimitError> {
        let window = self.window_for(key);
        let mut window = window.lock().expect("rate limit window lock is not poisoned");

        if window.window_start.elapsed() >= self.config.window {
            window.count = 0;
            window.window_start = Instant::now();
        }

        window.count = window.count.saturating_add(1);

        if window.count > self.config.limit {
            tracing::warn!(
                key,
                count = window.count,
                limit = self.config.limit,
                "rate limit exceeded"
            );
            return Err(RateLimitError {
                limit: self.config.limit,
                window_secs: self.config.window.as_secs(),
            });
        }

        Ok(())
    }

    pub const fn config(&self) -> RateLimitConfig {
        self.config
    }

    fn window_for(&self, key: &str) -> Arc<Mutex<Window>> {
        if let Some(window) = self
            .windows
            .read()
            .expect("rate limit map lock is not poisoned")
            .get(key)
        {
            return Arc::clone(window);
        }

        let mut map = self
            .windows
            .write()
            .expect("rate limit map lock is not poisoned");
        Arc::clone(map.entry(key.to_owned()).or_insert_with(|| {
            Arc::new(Mutex::new(Window {
                count: 0,
                window_start: Instant::now(),
            }))
        }))
    }
}
