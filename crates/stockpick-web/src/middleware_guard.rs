//! API-key authentication and rate limiting for the product route.
//!
//! Ordering matters: key presence, then key validity, then the rate
//! limit — a throttled call is rejected before it can touch the cache or
//! any vendor.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::AppState;

pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = request
        .headers()
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::MissingApiKey)?;

    if !state.api_keys.contains(key) {
        return Err(ApiError::InvalidApiKey);
    }

    state.limiter.check(key)?;

    Ok(next.run(request).await)
}
