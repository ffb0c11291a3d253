use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use stockpick_core::{BestOffer, Sku};

use crate::error::ApiError;
use crate::AppState;

/// `GET /products/{sku}` — the pipeline entry point.
///
/// SKU validation happens here, before anything downstream runs; auth and
/// rate limiting already happened in the route guard.
pub async fn get_product(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<Json<BestOffer>, ApiError> {
    let sku = Sku::parse(&sku)?;
    let offer = state.service.get_best_offer(&sku).await;
    Ok(Json(offer))
}

/// `GET /health` — process liveness, independent of vendor or cache
/// contents. Exempt from auth and rate limiting.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let cached_entries = state.service.cache().len().await;
    Json(json!({
        "status": "healthy",
        "service": "stockpick",
        "cache": { "available": true, "entries": cached_entries },
    }))
}

/// `GET /` — service banner.
pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "stockpick",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
    }))
}
