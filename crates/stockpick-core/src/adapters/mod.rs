//! Vendor adapters, one per wire format.
//!
//! Each adapter owns its vendor's endpoint layout and JSON field names;
//! nothing outside this module knows what a vendor response looks like.

pub mod acme;
pub mod northfield;
pub mod zento;

pub use acme::AcmeAdapter;
pub use northfield::NorthfieldAdapter;
pub use zento::ZentoAdapter;
