//! Behavior-driven tests for the HTTP surface: authentication, SKU
//! validation, rate limiting, and response shapes.

use std::collections::HashSet;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use stockpick_tests::{
    fast_aggregator_config, Arc, FixedWindowLimiter, OfferCache, OfferService, RateLimitConfig,
    StubVendor, VendorAggregator, VendorError, VendorId, VendorSource,
};
use stockpick_web::AppState;

const API_KEY: &str = "test-key-123";

fn app(sources: Vec<Arc<StubVendor>>, rate_limit: RateLimitConfig) -> Router {
    let sources: Vec<Arc<dyn VendorSource>> = sources
        .into_iter()
        .map(|source| source as Arc<dyn VendorSource>)
        .collect();
    let service = OfferService::new(
        VendorAggregator::new(sources, fast_aggregator_config()),
        OfferCache::new(Duration::from_secs(60)),
    );

    let state = AppState {
        service: Arc::new(service),
        limiter: Arc::new(FixedWindowLimiter::new(rate_limit)),
        api_keys: Arc::new(HashSet::from([API_KEY.to_string()])),
    };

    stockpick_web::router(state)
}

fn healthy_app() -> Router {
    app(
        vec![StubVendor::always_ok(VendorId::Acme, 99.99, 10)],
        RateLimitConfig::default(),
    )
}

fn product_request(sku: &str, api_key: Option<&str>) -> Request<Body> {
    let builder = Request::builder().uri(format!("/products/{sku}"));
    let builder = match api_key {
        Some(key) => builder.header("x-api-key", key),
        None => builder,
    };
    builder.body(Body::empty()).expect("valid request")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("json body")
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn missing_api_key_is_401() {
    let response = healthy_app()
        .oneshot(product_request("ABC123", None))
        .await
        .expect("infallible");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing API key");
}

#[tokio::test]
async fn unknown_api_key_is_403() {
    let response = healthy_app()
        .oneshot(product_request("ABC123", Some("wrong-key")))
        .await
        .expect("infallible");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid API key");
}

// =============================================================================
// SKU validation happens before the pipeline
// =============================================================================

#[tokio::test]
async fn malformed_sku_is_400() {
    let vendor = StubVendor::always_ok(VendorId::Acme, 99.99, 10);
    let app = app(vec![vendor.clone()], RateLimitConfig::default());

    for bad in ["ab", "waytoolongforasku12345", "abc!23"] {
        let response = app
            .clone()
            .oneshot(product_request(bad, Some(API_KEY)))
            .await
            .expect("infallible");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "sku '{bad}'");
    }

    assert_eq!(vendor.call_count(), 0, "invalid SKUs never reach a vendor");
}

// =============================================================================
// Rate limiting
// =============================================================================

#[tokio::test]
async fn requests_over_the_limit_are_429_and_do_not_reach_the_pipeline() {
    let vendor = StubVendor::always_ok(VendorId::Acme, 99.99, 10);
    let app = app(
        vec![vendor.clone()],
        RateLimitConfig {
            limit: 2,
            window: Duration::from_secs(60),
        },
    );

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(product_request("ABC123", Some(API_KEY)))
            .await
            .expect("infallible");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(product_request("ABC123", Some(API_KEY)))
        .await
        .expect("infallible");
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Rate limit exceeded");

    // The first request fanned out, the second hit the cache, the third
    // was rejected before touching either.
    assert_eq!(vendor.call_count(), 1);
}

#[tokio::test]
async fn health_is_exempt_from_auth_and_rate_limiting() {
    let app = app(
        vec![StubVendor::always_ok(VendorId::Acme, 99.99, 10)],
        RateLimitConfig {
            limit: 1,
            window: Duration::from_secs(60),
        },
    );

    // No API key, repeated calls: always fine.
    for _ in 0..5 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("valid request"),
            )
            .await
            .expect("infallible");
        assert_eq!(response.status(), StatusCode::OK);
    }
}

// =============================================================================
// Response shapes
// =============================================================================

#[tokio::test]
async fn in_stock_response_carries_the_winning_vendor() {
    let response = healthy_app()
        .oneshot(product_request("ABC123", Some(API_KEY)))
        .await
        .expect("infallible");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["sku"], "ABC123");
    assert_eq!(body["status"], "IN_STOCK");
    assert_eq!(body["vendor"], "acme");
    assert_eq!(body["price"], 99.99);
    assert_eq!(body["stock"], 10);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn out_of_stock_response_is_200_with_no_vendor_detail() {
    let app = app(
        vec![
            StubVendor::always_failing(VendorId::Acme, VendorError::unavailable("down")),
            StubVendor::always_failing(VendorId::Northfield, VendorError::invalid_data("bad")),
            StubVendor::always_failing(VendorId::Zento, VendorError::unavailable("down")),
        ],
        RateLimitConfig::default(),
    );

    let response = app
        .oneshot(product_request("ABC123", Some(API_KEY)))
        .await
        .expect("infallible");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "OUT_OF_STOCK");
    assert!(body["message"].is_string());
    assert!(body.get("vendor").is_none());
    assert!(body.get("price").is_none());

    let raw = body.to_string().to_lowercase();
    for vendor in VendorId::ALL {
        assert!(!raw.contains(vendor.as_str()), "no vendor name may leak");
    }
}

#[tokio::test]
async fn root_returns_the_service_banner() {
    let response = healthy_app()
        .oneshot(
            Request::builder()
                .uri("/")
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
        .expect("infallible");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["service"], "stockpick");
    assert_eq!(body["status"], "running");
}
