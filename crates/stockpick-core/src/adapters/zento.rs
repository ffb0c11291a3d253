use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpAuth, HttpClient, HttpRequest};
use crate::normalize::normalize_quote;
use crate::vendor::{VendorError, VendorId, VendorSource};
use crate::{Quote, Sku};

/// Adapter for Zento Wholesale's inventory API.
///
/// Zento answers `GET /v2/items/{sku}/availability` with `available_units`
/// (nullable), `cost`, and a numeric `status_code` (1 = in stock,
/// 0 = out of stock).
#[derive(Clone)]
pub struct ZentoAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    auth: HttpAuth,
    call_timeout_ms: u64,
}

impl ZentoAdapter {
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

    fn availability_url(&self, sku: &Sku) -> String {
        format!(
            "{}/v2/items/{}/availability",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(sku.as_str())
        )
    }
}

impl VendorSource for ZentoAdapter {
    fn id(&self) -> VendorId {
        VendorId::Zento
    }

    fn fetch<'a>(
        &'a self,
        sku: &'a Sku,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, VendorError>> + Send + 'a>> {
        Box::pin(async move {
            let request = HttpRequest::get(self.availability_url(sku))
                .with_auth(&self.auth)
                .with_timeout_ms(self.call_timeout_ms);

            let response = self.http_client.execute(request).await.map_err(|error| {
                VendorError::unavailable(format!("zento transport error: {}", error.message()))
            })?;

            if response.status == 404 {
                return Err(VendorError::invalid_data(format!(
                    "zento does not list sku {sku}"
                )));
            }
            if !response.is_success() {
                return Err(VendorError::unavailable(format!(
                    "zento returned status {}",
                    response.status
                )));
            }

            let payload: ZentoAvailabilityPayload = serde_json::from_str(&response.body)
                .map_err(|error| {
                    VendorError::invalid_data(format!("zento payload failed to decode: {error}"))
                })?;

            normalize_quote(
                VendorId::Zento,
                sku,
                payload.cost,
                payload.available_units,
                payload.status_code == Some(1),
            )
        })
    }
}

#[derive(Debug, Deserialize)]
struct ZentoAvailabilityPayload {
    #[serde(default)]
    available_units: Option<i64>,
    #[serde(default)]
    cost: Option<f64>,
    #[serde(default)]
    status_code: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::StaticHttpClient;
    use crate::{Availability, VendorErrorKind};

    fn sku() -> Sku {
        Sku::parse("PQR202").expect("valid sku")
    }

    fn adapter(status: u16, body: &str) -> ZentoAdapter {
        ZentoAdapter::new(
            Arc::new(StaticHttpClient::new(status, body)),
            "https://zento.test",
        )
    }

    #[tokio::test]
    async fn normalizes_numeric_status_code() {
        let adapter = adapter(
            200,
            r#"{"item_code":"PQR202","available_units":8,"cost":95.0,"status_code":1,"data_timestamp":"2026-01-01T00:00:00Z"}"#,
        );

        let quote = adapter.fetch(&sku()).await.expect("must succeed");
        assert_eq!(quote.vendor, VendorId::Zento);
        assert_eq!(quote.price, 95.0);
        assert_eq!(quote.stock, 8);
        assert_eq!(quote.status, Availability::InStock);
    }

    #[tokio::test]
    async fn status_code_zero_with_null_units_is_out_of_stock() {
        let adapter = adapter(200, r#"{"available_units":null,"cost":50.0,"status_code":0}"#);

        let quote = adapter.fetch(&sku()).await.expect("must succeed");
        assert_eq!(quote.stock, 0);
        assert_eq!(quote.status, Availability::OutOfStock);
    }

    #[tokio::test]
    async fn status_code_one_with_null_units_infers_five() {
        let adapter = adapter(200, r#"{"available_units":null,"cost":50.0,"status_code":1}"#);

        let quote = adapter.fetch(&sku()).await.expect("must succeed");
        assert_eq!(quote.stock, 5);
    }

    #[tokio::test]
    async fn negative_cost_is_invalid_data() {
        let adapter = adapter(200, r#"{"available_units":4,"cost":-1.0,"status_code":1}"#);

        let err = adapter.fetch(&sku()).await.expect_err("must fail");
        assert_eq!(err.kind(), VendorErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn transport_failure_is_unavailable() {
        use crate::http_client::{HttpError, ScriptedHttpClient};

        let adapter = ZentoAdapter::new(
            Arc::new(ScriptedHttpClient::new(vec![Err(HttpError::new(
                "connection refused",
            ))])),
            "https://zento.test",
        );

        let err = adapter.fetch(&sku()).await.expect_err("must fail");
        assert_eq!(err.kind(), VendorErrorKind::Unavailable);
    }
}
