use serde::{Deserialize, Serialize};

use crate::vendor::VendorId;
use crate::{Sku, UtcDateTime, ValidationError};

/// Canonical availability status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    InStock,
    OutOfStock,
}

/// One vendor's normalized answer for a SKU.
///
/// Quotes are created once per request per vendor and never mutated.
/// The constructor enforces the availability invariant: an out-of-stock
/// quote carries zero units, an in-stock quote carries at least one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub vendor: VendorId,
    pub sku: Sku,
    pub price: f64,
    pub stock: u32,
    pub status: Availability,
    /// Assigned at the moment the vendor response was normalized.
    pub observed_at: UtcDateTime,
}

impl Quote {
    pub fn new(
        vendor: VendorId,
        sku: Sku,
        price: f64,
        stock: u32,
        status: Availability,
        observed_at: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(ValidationError::InvalidPrice { value: price });
        }

        match status {
            Availability::InStock if stock == 0 => {
                return Err(ValidationError::InStockWithoutUnits);
            }
            Availability::OutOfStock if stock != 0 => {
                return Err(ValidationError::OutOfStockWithUnits { stock });
            }
            _ => {}
        }

        Ok(Self {
            vendor,
            sku,
            price,
            stock,
            status,
            observed_at,
        })
    }
}

/// The pipeline's answer for one SKU — what callers receive and what the
/// offer cache stores.
///
/// Either the winning vendor's price/stock snapshot, or an out-of-stock
/// verdict with a message that names no vendor or internal cause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestOffer {
    pub sku: Sku,
    pub status: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<UtcDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BestOffer {
    pub fn in_stock(quote: &Quote) -> Self {
        Self {
            sku: quote.sku.clone(),
            status: Availability::InStock,
            vendor: Some(quote.vendor),
            price: Some(quote.price),
            stock: Some(quote.stock),
            timestamp: Some(quote.observed_at),
            message: None,
        }
    }

    pub fn out_of_stock(sku: Sku, message: impl Into<String>) -> Self {
        Self {
            sku,
            status: Availability::OutOfStock,
            vendor: None,
            price: None,
            stock: None,
            timestamp: None,
            message: Some(message.into()),
        }
    }
}
