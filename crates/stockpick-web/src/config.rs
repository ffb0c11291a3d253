use std::collections::HashSet;
use std::net::SocketAddr;
use std::time::Duration;

use stockpick_core::RateLimitConfig;

/// Process configuration, read once at startup from `STOCKPICK_*` env
/// vars. Every pipeline knob defaults to the documented value.
pub struct Config {
    pub listen_addr: SocketAddr,
    pub api_keys: HashSet<String>,
    pub vendor_timeout: Duration,
    pub max_retries: u32,
    pub freshness_cutoff: Duration,
    pub breaker_threshold: u32,
    pub breaker_cooldown: Duration,
    pub cache_ttl: Duration,
    pub rate_limit: RateLimitConfig,
    pub prewarm_skus: Vec<String>,
    pub prewarm_interval: Duration,
    pub acme_url: String,
    pub northfield_url: String,
    pub zento_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let listen_addr: SocketAddr = std::env::var("STOCKPICK_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse()
            .expect("Invalid STOCKPICK_LISTEN_ADDR");

        Self {
            listen_addr,
            api_keys: csv_set(&env_or("STOCKPICK_API_KEYS", "dev-key-local")),
            vendor_timeout: Duration::from_millis(env_u64("STOCKPICK_VENDOR_TIMEOUT_MS", 2_000)),
            max_retries: env_u64("STOCKPICK_VENDOR_MAX_RETRIES", 2) as u32,
            freshness_cutoff: Duration::from_secs(env_u64("STOCKPICK_FRESHNESS_CUTOFF_SECS", 600)),
            breaker_threshold: env_u64("STOCKPICK_BREAKER_FAILURE_THRESHOLD", 3) as u32,
            breaker_cooldown: Duration::from_secs(env_u64("STOCKPICK_BREAKER_COOLDOWN_SECS", 30)),
            cache_ttl: Duration::from_secs(env_u64("STOCKPICK_CACHE_TTL_SECS", 120)),
            rate_limit: RateLimitConfig {
                limit: env_u64("STOCKPICK_RATE_LIMIT_REQUESTS", 60) as u32,
                window: Duration::from_secs(env_u64("STOCKPICK_RATE_LIMIT_WINDOW_SECS", 60)),
            },
            prewarm_skus: csv_list(&env_or("STOCKPICK_PREWARM_SKUS", "")),
            prewarm_interval: Duration::from_secs(env_u64("STOCKPICK_PREWARM_INTERVAL_SECS", 300)),
            acme_url: env_or("STOCKPICK_ACME_URL", "http://localhost:9001"),
            northfield_url: env_or("STOCKPICK_NORTHFIELD_URL", "http://localhost:9002"),
            zento_url: env_or("STOCKPICK_ZENTO_URL", "http://localhost:9003"),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn csv_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn csv_set(value: &str) -> HashSet<String> {
    csv_list(value).into_iter().collect()
}
