use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpAuth, HttpClient, HttpRequest};
use crate::normalize::normalize_quote;
use crate::vendor::{VendorError, VendorId, VendorSource};
use crate::{Quote, Sku};

/// Adapter for Northfield Distribution's catalog lookup.
///
/// Northfield answers `GET /catalog/lookup?sku={sku}` with `stock_count`
/// (nullable), `price_amount`, and a boolean `in_stock` flag instead of a
/// status string.
#[derive(Clone)]
pub struct NorthfieldAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    auth: HttpAuth,
    call_timeout_ms: u64,
}

impl NorthfieldAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            auth: HttpAuth::None,
            call_timeout_ms: 2_000,
        }
    }

    pub fn with_auth(mut self, auth: HttpAuth) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_call_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.call_timeout_ms = timeout_ms;
        self
    }

    fn lookup_url(&self, sku: &Sku) -> String {
        format!(
            "{}/catalog/lookup?sku={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(sku.as_str())
        )
    }
}

impl VendorSource for NorthfieldAdapter {
    fn id(&self) -> VendorId {
        VendorId::Northfield
    }

    fn fetch<'a>(
        &'a self,
        sku: &'a Sku,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, VendorError>> + Send + 'a>> {
        Box::pin(async move {
            let request = HttpRequest::get(self.lookup_url(sku))
                .with_auth(&self.auth)
                .with_timeout_ms(self.call_timeout_ms);

            let response = self.http_client.execute(request).await.map_err(|error| {
                VendorError::unavailable(format!("northfield transport error: {}", error.message()))
            })?;

            if response.status == 404 {
                return Err(VendorError::invalid_data(format!(
                    "northfield does not list sku {sku}"
                )));
            }
            if !response.is_success() {
                return Err(VendorError::unavailable(format!(
                    "northfield returned status {}",
                    response.status
                )));
            }

            let payload: NorthfieldLookupPayload = serde_json::from_str(&response.body)
                .map_err(|error| {
                    VendorError::invalid_data(format!(
                        "northfield payload failed to decode: {error}"
                    ))
                })?;

            normalize_quote(
                VendorId::Northfield,
                sku,
                payload.price_amount,
                payload.stock_count,
                payload.in_stock,
            )
        })
    }
}

#[derive(Debug, Deserialize)]
struct NorthfieldLookupPayload {
    #[serde(default)]
    stock_count: Option<i64>,
    #[serde(default)]
    price_amount: Option<f64>,
    #[serde(default)]
    in_stock: bool,
}
