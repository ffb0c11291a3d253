//! HTTP surface for the stockpick service: routing, API-key auth,
//! rate-limit middleware, and the background prewarm job.

use std::collections::HashSet;
use std::sync::Arc;

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use stockpick_core::{
    AcmeAdapter, AggregatorConfig, CircuitBreakerConfig, FixedWindowLimiter, NorthfieldAdapter,
    OfferCache, OfferService, ReqwestHttpClient, RetryConfig, VendorAggregator, VendorSource,
    ZentoAdapter,
};

pub mod config;
pub mod error;
pub mod middleware_guard;
pub mod prewarm;
pub mod routes;

pub use config::Config;
pub use error::ApiError;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OfferService>,
    pub limiter: Arc<FixedWindowLimiter>,
    pub api_keys: Arc<HashSet<String>>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Wires the production pipeline from configuration: one shared reqwest
/// transport, three vendor adapters, the aggregator, and the offer cache.
pub fn build_state(config: &Config) -> AppState {
    let http_client = Arc::new(ReqwestHttpClient::new());
    let timeout_ms = config.vendor_timeout.as_millis() as u64;

    let sources: Vec<Arc<dyn VendorSource>> = vec![
        Arc::new(
            AcmeAdapter::new(http_client.clone(), config.acme_url.clone())
                .with_call_timeout_ms(timeout_ms),
        ),
        Arc::new(
            NorthfieldAdapter::new(http_client.clone(), config.northfield_url.clone())
                .with_call_timeout_ms(timeout_ms),
        ),
        Arc::new(
            ZentoAdapter::new(http_client.clone(), config.zento_url.clone())
                .with_call_timeout_ms(timeout_ms),
        ),
    ];

    let aggregator = VendorAggregator::new(
        sources,
        AggregatorConfig {
            retry: RetryConfig {
                max_retries: config.max_retries,
                per_call_timeout: config.vendor_timeout,
                ..RetryConfig::default()
            },
            breaker: CircuitBreakerConfig {
                failure_threshold: config.breaker_threshold,
                cooldown: config.breaker_cooldown,
            },
            freshness_cutoff: config.freshness_cutoff,
        },
    );

    AppState {
        service: Arc::new(OfferService::new(
            aggregator,
            OfferCache::new(config.cache_ttl),
        )),
        limiter: Arc::new(FixedWindowLimiter::new(config.rate_limit)),
        api_keys: Arc::new(config.api_keys.clone()),
    }
}

/// Assembles the router. Only the product lookup sits behind the API-key
/// and rate-limit guard; health and root stay open so probes keep working
/// when callers are throttled.
pub fn router(state: AppState) -> Router {
    let guarded = Router::new()
        .route("/products/:sku", get(routes::get_product))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            middleware_guard::require_api_key,
        ));

    Router::new()
        .merge(guarded)
        .route("/health", get(routes::health))
        .route("/", get(routes::root))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
