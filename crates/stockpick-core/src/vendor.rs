//! Vendor identifiers, adapter-level errors, and the adapter contract.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Quote, Sku, ValidationError};

/// The three supported vendor backends.
///
/// Declaration order doubles as the fixed vendor priority used to break
/// ties in the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorId {
    Acme,
    Northfield,
    Zento,
}

impl VendorId {
    pub const ALL: [Self; 3] = [Self::Acme, Self::Northfield, Self::Zento];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acme => "acme",
            Self::Northfield => "northfield",
            Self::Zento => "zento",
        }
    }

    /// Tie-break rank: lower wins.
    pub const fn priority(self) -> u8 {
        match self {
            Self::Acme => 0,
            Self::Northfield => 1,
            Self::Zento => 2,
        }
    }
}

impl Display for VendorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VendorId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "acme" => Ok(Self::Acme),
            "northfield" => Ok(Self::Northfield),
            "zento" => Ok(Self::Zento),
            other => Err(ValidationError::InvalidVendor {
                value: other.to_owned(),
            }),
        }
    }
}

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorErrorKind {
    /// Transport failure, timeout, or upstream 5xx — worth retrying.
    Unavailable,
    /// The vendor answered, but the payload failed schema or price
    /// validation. Deterministic, so never retried.
    InvalidData,
    /// Rejected by the vendor's circuit breaker without an outbound call.
    CircuitOpen,
}

/// Structured per-vendor error, absorbed by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorError {
    kind: VendorErrorKind,
    message: String,
    retryable: bool,
}

impl VendorError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: VendorErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self {
            kind: VendorErrorKind::InvalidData,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn circuit_open(vendor: VendorId) -> Self {
        Self {
            kind: VendorErrorKind::CircuitOpen,
            message: format!("circuit breaker for '{vendor}' is open; call skipped"),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> VendorErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            VendorErrorKind::Unavailable => "vendor.unavailable",
            VendorErrorKind::InvalidData => "vendor.invalid_data",
            VendorErrorKind::CircuitOpen => "vendor.circuit_open",
        }
    }
}

impl Display for VendorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for VendorError {}

/// Vendor adapter contract.
///
/// One implementation per vendor wire format; the adapter is the only
/// place that understands its vendor's JSON shape. `fetch` performs a
/// single attempt with no internal retry — retries and circuit breaking
/// are layered on top by the aggregator.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` as they are shared across
/// concurrent request tasks.
pub trait VendorSource: Send + Sync {
    /// Returns the vendor this adapter speaks for.
    fn id(&self) -> VendorId;

    /// Fetches and normalizes one quote for `sku`.
    ///
    /// # Errors
    ///
    /// Returns [`VendorError`] if:
    /// - The vendor is unreachable, times out, or answers with a server
    ///   error (`Unavailable`)
    /// - The response fails schema or price validation (`InvalidData`)
    fn fetch<'a>(
        &'a self,
        sku: &'a Sku,
    ) -> Pin<Box<dyn Future<Output = Result<Quote, VendorError>> + Send + 'a>>;
}
