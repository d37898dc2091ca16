//! Error taxonomy for price normalization.

use thiserror::Error;

/// Errors produced while converting venue prices into share prices.
///
/// Both variants indicate bad input data, never transient conditions, so
/// callers propagate them rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OddsError {
    /// The raw price is malformed for its declared format (zero American
    /// odds, non-positive decimal odds).
    #[error("invalid odds input: {0}")]
    InvalidInput(String),

    /// The price-format tag is not one this system understands.
    #[error("unsupported price format: {0}")]
    UnsupportedFormat(String),
}
