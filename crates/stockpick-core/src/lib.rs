//! # Stockpick Core
//!
//! Core pipeline for the stockpick vendor-selection service: query several
//! independent, unreliable vendor catalogs for one SKU, normalize whatever
//! comes back into a single quote schema, and pick the vendor worth buying
//! from right now.
//!
//! ## Overview
//!
//! - **Canonical domain models** for SKUs, quotes, and best-offer results
//! - **Vendor adapters** for the three supported catalog backends
//! - **Circuit breaker** per vendor, gating calls to failing backends
//! - **Retry wrapper** with per-attempt timeouts around each adapter call
//! - **Aggregator** fanning out to all vendors and joining on every outcome
//! - **Decision engine** applying the price/stock trade-off rule
//! - **Offer cache** (read-through, TTL) and **fixed-window rate limiter**
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  HTTP caller    │
//! └────────┬────────┘
//!          │  (rate limit, per API key)
//!          ▼
//! ┌─────────────────┐ cache hit
//! │  OfferService   │──────────▶ cached BestOffer
//! └────────┬────────┘
//!          │ miss
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ VendorAggregator│────▶│ CircuitBreaker ×3│
//! └────────┬────────┘     └──────────────────┘
//!          │ fan-out, join-all
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ VendorSource ×3 │────▶│ HttpClient       │
//! │ (adapter trait) │     │ (reqwest/static) │
//! └────────┬────────┘     └──────────────────┘
//!          ▼
//!   freshness filter ─▶ decision engine ─▶ BestOffer
//! ```
//!
//! ## Error Handling
//!
//! Everything below the aggregator returns structured [`VendorError`]s;
//! the aggregator absorbs them, so a single failing vendor can never fail
//! a request. Callers only ever see a [`BestOffer`], a validation error
//! for bad input, or a rate-limit rejection.

pub mod adapters;
pub mod aggregator;
pub mod cache;
pub mod circuit_breaker;
pub mod decision;
pub mod domain;
pub mod error;
pub mod freshness;
pub mod http_client;
pub mod normalize;
pub mod rate_limit;
pub mod retry;
pub mod service;
pub mod vendor;

// Re-export commonly used types at crate root for convenience

// Adapter implementations
pub use adapters::{AcmeAdapter, NorthfieldAdapter, ZentoAdapter};

// Aggregation pipeline
pub use aggregator::{AggregatorConfig, BreakerSnapshot, VendorAggregator};

// Caching
pub use cache::OfferCache;

// Circuit breaker
pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};

// Decision engine
pub use decision::{select_best, PRICE_TOLERANCE};

// Domain models
pub use domain::{Availability, BestOffer, Quote, Sku, UtcDateTime};

// Error types
pub use error::ValidationError;

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
    ScriptedHttpClient, StaticHttpClient,
};

// Rate limiting
pub use rate_limit::{FixedWindowLimiter, RateLimitConfig, RateLimitError};

// Retry logic
pub use retry::{fetch_with_retry, Backoff, RetryConfig};

// Cache envelope / pipeline entry point
pub use service::OfferService;

// Vendor contract
pub use vendor::{VendorError, VendorErrorKind, VendorId, VendorSource};
