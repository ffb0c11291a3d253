//! Background cache prewarm for popular SKUs.
//!
//! Runs as an ordinary pipeline client on a fixed interval: whatever it
//! fetches lands in the offer cache through the same read-through path
//! requests use. After each sweep it logs one line per vendor with the
//! circuit-breaker state, which is the service's vendor-health metric.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::{info, warn};

use stockpick_core::{OfferService, Sku};

pub fn spawn(
    service: Arc<OfferService>,
    skus: Vec<String>,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            skus = skus.len(),
            period_secs = period.as_secs(),
            "cache prewarm scheduler started"
        );

        let mut ticker = interval(period);
        loop {
            ticker.tick().await;
            prewarm_once(&service, &skus).await;
            log_vendor_metrics(&service);
        }
    })
}

async fn prewarm_once(service: &OfferService, skus: &[String]) {
    for raw in skus {
        let sku = match Sku::parse(raw) {
            Ok(sku) => sku,
            Err(error) => {
                warn!(sku = raw.as_str(), "skipping unparseable prewarm sku: {error}");
                continue;
            }
        };

        // A failure here only means this SKU stays cold until the next sweep.
        let offer = service.get_best_offer(&sku).await;
        tracing::debug!(
            sku = sku.as_str(),
            status = ?offer.status,
            "prewarmed"
        );
    }

    info!(skus = skus.len(), "cache prewarm sweep complete");
}

fn log_vendor_metrics(service: &OfferService) {
    for snapshot in service.vendor_health() {
        info!(
            vendor = snapshot.vendor.as_str(),
            state = ?snapshot.state,
            consecutive_failures = snapshot.consecutive_failures,
            "vendor circuit status"
        );
    }
}
