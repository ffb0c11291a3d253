use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use stockpick_core::{RateLimitError, ValidationError};

/// Caller-visible failures. Everything below the pipeline is absorbed
/// before it reaches this type — an `ApiError` never describes a vendor.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("x-api-key header is required")]
    MissingApiKey,
    #[error("the provided API key is not valid")]
    InvalidApiKey,
    #[error(transparent)]
    InvalidSku(#[from] ValidationError),
    #[error(transparent)]
    RateLimited(#[from] RateLimitError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingApiKey => StatusCode::UNAUTHORIZED,
            Self::InvalidApiKey => StatusCode::FORBIDDEN,
            Self::InvalidSku(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "Missing API key",
            Self::InvalidApiKey => "Invalid API key",
            Self::InvalidSku(_) => "Invalid SKU",
            Self::RateLimited(_) => "Rate limit exceeded",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.label(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}
