use thiserror::Error;

/// Validation and contract errors exposed by `stockpick-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("sku cannot be empty")]
    EmptySku,
    #[error("sku length {len} outside allowed range {min}..={max}")]
    SkuLength { len: usize, min: usize, max: usize },
    #[error("sku contains invalid character '{ch}' at index {index}")]
    SkuInvalidChar { ch: char, index: usize },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("quote price must be a positive finite number, got {value}")]
    InvalidPrice { value: f64 },
    #[error("an in-stock quote must carry at least one unit")]
    InStockWithoutUnits,
    #[error("an out-of-stock quote must carry zero units, got {stock}")]
    OutOfStockWithUnits { stock: u32 },

    #[error("invalid vendor '{value}', expected one of acme, northfield, zento")]
    InvalidVendor { value: String },
}
