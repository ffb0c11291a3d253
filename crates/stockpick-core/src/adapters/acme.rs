use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpAuth, HttpClient, HttpRequest};
use crate::normalize::normalize_quote;
use crate::vendor::{VendorError, VendorId, VendorSource};
use crate::{Quote, Sku};

/// Adapter for Acme Supply's product API.
///
/// Acme exposes `GET /api/v1/products/{sku}` and reports inventory as
/// `quantity` (nullable), price as `unit_price`, and availability as the
/// string `availability_status` (`"IN_STOCK"` / `"OUT_OF_STOCK"`).
#[derive(Clone)]
pub struct AcmeAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    auth: HttpAuth,
    call_timeout_ms: u64,
}

impl AcmeAdapter {
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

    fn product_url(&self, sku: &Sku) -> String {
        format!(
            "{}/api/v1/products/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(sku.as_str())
        )
    }
}

impl VendorSource for AcmeAdapter {
    fn id(&self) -> VendorId {
        VendorId::Acme
    }

    fn fetch<'a>(
        &'a self,
        sku: &'a Sku,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, VendorError>> + Send + 'a>> {
        Box::pin(async move {
            let request = HttpRequest::get(self.product_url(sku))
                .with_auth(&self.auth)
                .with_timeout_ms(self.call_timeout_ms);

            let response = self.http_client.execute(request).await.map_err(|error| {
                VendorError::unavailable(format!("acme transport error: {}", error.message()))
            })?;

            if response.status == 404 {
                return Err(VendorError::invalid_data(format!(
                    "acme does not list sku {sku}"
                )));
            }
            if !response.is_success() {
                return Err(VendorError::unavailable(format!(
                    "acme returned status {}",
                    response.status
                )));
            }

            let payload: AcmeProductPayload =
                serde_json::from_str(&response.body).map_err(|error| {
                    VendorError::invalid_data(format!("acme payload failed to decode: {error}"))
                })?;

            normalize_quote(
                VendorId::Acme,
                sku,
                payload.unit_price,
                payload.quantity,
                payload.availability_status.as_deref() == Some("IN_STOCK"),
            )
        })
    }
}

#[derive(Debug, Deserialize)]
struct AcmeProductPayload {
    #[serde(default)]
    quantity: Option<i64>,
    #[serde(default)]
    unit_price: Option<f64>,
    #[serde(default)]
    availability_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::StaticHttpClient;
    use crate::{Availability, VendorErrorKind};

    fn sku() -> Sku {
        Sku::parse("ABC123").expect("valid sku")
    }

    fn adapter(status: u16, body: &str) -> AcmeAdapter {
        AcmeAdapter::new(
            Arc::new(StaticHttpClient::new(status, body)),
            "https://acme.test",
        )
    }

    #[tokio::test]
    async fn normalizes_a_regular_product_response() {
        let adapter = adapter(
            200,
            r#"{"product_id":"ABC123","quantity":10,"unit_price":99.99,"availability_status":"IN_STOCK","last_updated":"2026-01-01T00:00:00Z"}"#,
        );

        let quote = adapter.fetch(&sku()).await.expect("must succeed");
        assert_eq!(quote.vendor, VendorId::Acme);
        assert_eq!(quote.price, 99.99);
        assert_eq!(quote.stock, 10);
        assert_eq!(quote.status, Availability::InStock);
    }

    #[tokio::test]
    async fn null_quantity_with_in_stock_status_infers_five_units() {
        let adapter = adapter(
            200,
            r#"{"product_id":"ABC123","quantity":null,"unit_price":149.5,"availability_status":"IN_STOCK"}"#,
        );

        let quote = adapter.fetch(&sku()).await.expect("must succeed");
        assert_eq!(quote.stock, 5);
        assert_eq!(quote.status, Availability::InStock);
    }

    #[tokio::test]
    async fn non_numeric_price_is_invalid_data() {
        let adapter = adapter(
            200,
            r#"{"quantity":3,"unit_price":"free","availability_status":"IN_STOCK"}"#,
        );

        let err = adapter.fetch(&sku()).await.expect_err("must fail");
        assert_eq!(err.kind(), VendorErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn unknown_sku_is_invalid_data_not_an_outage() {
        let adapter = adapter(404, r#"{"error":"not found"}"#);

        let err = adapter.fetch(&sku()).await.expect_err("must fail");
        assert_eq!(err.kind(), VendorErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn server_error_is_unavailable() {
        let adapter = adapter(503, "");

        let err = adapter.fetch(&sku()).await.expect_err("must fail");
        assert_eq!(err.kind(), VendorErrorKind::Unavailable);
        assert!(err.retryable());
    }
}
