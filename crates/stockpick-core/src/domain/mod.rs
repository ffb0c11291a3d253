//! Canonical domain types shared across the pipeline.

pub mod models;
pub mod sku;
pub mod timestamp;

pub use models::{Availability, BestOffer, Quote};
pub use sku::Sku;
pub use timestamp::UtcDateTime;
