//! Shared normalization rules applied to every vendor response.
//!
//! All three adapters funnel their raw fields through this module, so the
//! stock-inference and price-validation rules cannot drift per vendor.

use crate::domain::{Availability, Quote};
use crate::vendor::{VendorError, VendorId};
use crate::{Sku, UtcDateTime};

/// Units assumed when a vendor reports no inventory figure but marks the
/// item in stock.
pub const INFERRED_IN_STOCK_UNITS: u32 = 5;

/// Stock inference rule:
/// - inventory absent + vendor-marked in stock → assume
///   [`INFERRED_IN_STOCK_UNITS`], IN_STOCK
/// - inventory present and positive → that count, IN_STOCK
/// - anything else → zero units, OUT_OF_STOCK
pub fn infer_stock(inventory: Option<i64>, marked_in_stock: bool) -> (u32, Availability) {
    match inventory {
        None if marked_in_stock => (INFERRED_IN_STOCK_UNITS, Availability::InStock),
        Some(units) if units > 0 => (
            u32::try_from(units).unwrap_or(u32::MAX),
            Availability::InStock,
        ),
        _ => (0, Availability::OutOfStock),
    }
}

/// Builds a canonical [`Quote`] from one vendor's raw fields.
///
/// A missing or non-positive price invalidates the whole response — the
/// adapter's deserialization already rejected non-numeric values. Valid
/// prices pass through unchanged. `observed_at` is stamped here, at
/// normalization time.
pub fn normalize_quote(
    vendor: VendorId,
    sku: &Sku,
    price: Option<f64>,
    inventory: Option<i64>,
    marked_in_stock: bool,
) -> Result<Quote, VendorError> {
    let price = match price {
        Some(value) if value.is_finite() && value > 0.0 => value,
        Some(value) => {
            return Err(VendorError::invalid_data(format!(
                "{vendor} returned invalid price {value} for sku {sku}"
            )));
        }
        None => {
            return Err(VendorError::invalid_data(format!(
                "{vendor} returned no price for sku {sku}"
            )));
        }
    };

    let (stock, status) = infer_stock(inventory, marked_in_stock);

    Quote::new(vendor, sku.clone(), price, stock, status, UtcDateTime::now()).map_err(|e| {
        VendorError::invalid_data(format!("{vendor} response failed validation: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku() -> Sku {
        Sku::parse("ABC123").expect("valid sku")
    }

    #[test]
    fn null_inventory_with_in_stock_flag_assumes_five_units() {
        let (stock, status) = infer_stock(None, true);
        assert_eq!(stock, 5);
        assert_eq!(status, Availability::InStock);
    }

    #[test]
    fn null_inventory_without_in_stock_flag_is_out_of_stock() {
        let (stock, status) = infer_stock(None, false);
        assert_eq!(stock, 0);
        assert_eq!(status, Availability::OutOfStock);
    }

    #[test]
    fn zero_or_negative_inventory_is_out_of_stock_even_if_marked_in_stock() {
        assert_eq!(infer_stock(Some(0), true), (0, Availability::OutOfStock));
        assert_eq!(infer_stock(Some(-3), true), (0, Availability::OutOfStock));
    }

    #[test]
    fn positive_inventory_is_in_stock_regardless_of_flag() {
        assert_eq!(infer_stock(Some(7), false), (7, Availability::InStock));
        assert_eq!(infer_stock(Some(7), true), (7, Availability::InStock));
    }

    #[test]
    fn valid_price_passes_through_unchanged() {
        let quote = normalize_quote(VendorId::Acme, &sku(), Some(99.99), Some(10), true)
            .expect("valid response");
        assert_eq!(quote.price, 99.99);
        assert_eq!(quote.stock, 10);
        assert_eq!(quote.status, Availability::InStock);
    }

    #[test]
    fn missing_price_invalidates_the_response() {
        let err = normalize_quote(VendorId::Acme, &sku(), None, Some(10), true)
            .expect_err("must fail");
        assert_eq!(err.kind(), crate::VendorErrorKind::InvalidData);
    }

    #[test]
    fn non_positive_price_invalidates_the_response() {
        for bad in [0.0, -5.25, f64::NAN, f64::INFINITY] {
            let err = normalize_quote(VendorId::Zento, &sku(), Some(bad), Some(10), true)
                .expect_err("must fail");
            assert_eq!(err.kind(), crate::VendorErrorKind::InvalidData);
        }
    }
}
