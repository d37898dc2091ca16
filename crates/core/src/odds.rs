//! Odds normalization.
//!
//! Venues quote prices in different formats: prediction markets use a
//! probability-style share price in [0, 1], sportsbooks use decimal or
//! American odds. Everything downstream works on the canonical share price,
//! so ingestion converts at the boundary using the functions here.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::OddsError;

// =============================================================================
// Price Formats
// =============================================================================

/// The format a venue's raw price is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFormat {
    /// Probability-style share price, already in [0, 1].
    #[serde(rename = "share_0_1")]
    Share01,
    /// European decimal odds (total payout per unit staked).
    Decimal,
    /// American moneyline odds (+150 / -200).
    American,
}

impl PriceFormat {
    /// Parses a stored format tag.
    ///
    /// # Errors
    /// Returns [`OddsError::UnsupportedFormat`] for any tag outside the
    /// closed vocabulary.
    pub fn parse(tag: &str) -> Result<Self, OddsError> {
        match tag.to_ascii_lowercase().as_str() {
            "share_0_1" => Ok(Self::Share01),
            "decimal" => Ok(Self::Decimal),
            "american" => Ok(Self::American),
            _ => Err(OddsError::UnsupportedFormat(tag.to_string())),
        }
    }

    /// Returns the wire tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Share01 => "share_0_1",
            Self::Decimal => "decimal",
            Self::American => "american",
        }
    }
}

impl std::fmt::Display for PriceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Converts American odds to decimal odds.
///
/// `+150` becomes `2.5`, `-200` becomes `1.5`.
///
/// # Errors
/// Returns [`OddsError::InvalidInput`] when the odds are zero.
pub fn american_to_decimal(american_odds: Decimal) -> Result<Decimal, OddsError> {
    if american_odds.is_zero() {
        return Err(OddsError::InvalidInput(
            "American odds cannot be zero".to_string(),
        ));
    }
    if american_odds > Decimal::ZERO {
        Ok(Decimal::ONE + american_odds / dec!(100))
    } else {
        Ok(Decimal::ONE + dec!(100) / american_odds.abs())
    }
}

/// Converts decimal odds to the equivalent share price in [0, 1].
///
/// # Errors
/// Returns [`OddsError::InvalidInput`] when the odds are not positive.
pub fn decimal_to_share_price(decimal_odds: Decimal) -> Result<Decimal, OddsError> {
    if decimal_odds <= Decimal::ZERO {
        return Err(OddsError::InvalidInput(
            "decimal odds must be positive".to_string(),
        ));
    }
    Ok(Decimal::ONE / decimal_odds)
}

/// Converts American odds directly to a share price.
///
/// # Errors
/// Returns [`OddsError::InvalidInput`] when the odds are zero.
pub fn american_to_share_price(american_odds: Decimal) -> Result<Decimal, OddsError> {
    decimal_to_share_price(american_to_decimal(american_odds)?)
}

/// Normalizes a raw venue price into a canonical share price.
///
/// `share_0_1` prices pass through unvalidated; decimal and American odds are
/// converted. Pure function, no state.
///
/// # Errors
/// Returns [`OddsError::InvalidInput`] for malformed odds values.
pub fn normalize(raw_price: Decimal, format: PriceFormat) -> Result<Decimal, OddsError> {
    match format {
        PriceFormat::Share01 => Ok(raw_price),
        PriceFormat::Decimal => decimal_to_share_price(raw_price),
        PriceFormat::American => american_to_share_price(raw_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Decimal, b: Decimal) {
        assert!((a - b).abs() < dec!(0.000001), "{a} != {b}");
    }

    // ==================== Decimal Odds Tests ====================

    #[test]
    fn test_decimal_odds_invert() {
        assert_eq!(decimal_to_share_price(dec!(2.0)).unwrap(), dec!(0.5));
        assert_eq!(decimal_to_share_price(dec!(4.0)).unwrap(), dec!(0.25));
        assert_close(decimal_to_share_price(dec!(1.25)).unwrap(), dec!(0.8));
    }

    #[test]
    fn test_decimal_odds_rejects_non_positive() {
        assert!(matches!(
            decimal_to_share_price(Decimal::ZERO),
            Err(OddsError::InvalidInput(_))
        ));
        assert!(matches!(
            decimal_to_share_price(dec!(-1.5)),
            Err(OddsError::InvalidInput(_))
        ));
    }

    // ==================== American Odds Tests ====================

    #[test]
    fn test_american_positive() {
        // +150 -> decimal 2.5 -> share 0.4
        assert_eq!(american_to_decimal(dec!(150)).unwrap(), dec!(2.5));
        assert_close(american_to_share_price(dec!(150)).unwrap(), dec!(0.4));
    }

    #[test]
    fn test_american_negative() {
        // -200 -> decimal 1.5 -> share 0.6667
        assert_eq!(american_to_decimal(dec!(-200)).unwrap(), dec!(1.5));
        assert_close(
            american_to_share_price(dec!(-200)).unwrap(),
            dec!(0.666667),
        );
    }

    #[test]
    fn test_american_zero_rejected() {
        assert!(matches!(
            american_to_decimal(Decimal::ZERO),
            Err(OddsError::InvalidInput(_))
        ));
    }

    // ==================== Normalize Tests ====================

    #[test]
    fn test_normalize_share_passthrough() {
        // No range validation on share prices, by contract.
        assert_eq!(
            normalize(dec!(0.35), PriceFormat::Share01).unwrap(),
            dec!(0.35)
        );
        assert_eq!(
            normalize(dec!(1.2), PriceFormat::Share01).unwrap(),
            dec!(1.2)
        );
    }

    #[test]
    fn test_normalize_decimal() {
        assert_eq!(
            normalize(dec!(2.0), PriceFormat::Decimal).unwrap(),
            dec!(0.5)
        );
    }

    #[test]
    fn test_normalize_american() {
        assert_close(normalize(dec!(150), PriceFormat::American).unwrap(), dec!(0.4));
    }

    // ==================== Format Tag Tests ====================

    #[test]
    fn test_format_parse_known_tags() {
        assert_eq!(PriceFormat::parse("share_0_1").unwrap(), PriceFormat::Share01);
        assert_eq!(PriceFormat::parse("decimal").unwrap(), PriceFormat::Decimal);
        assert_eq!(PriceFormat::parse("AMERICAN").unwrap(), PriceFormat::American);
    }

    #[test]
    fn test_format_parse_unknown_tag() {
        assert_eq!(
            PriceFormat::parse("fractional"),
            Err(OddsError::UnsupportedFormat("fractional".to_string()))
        );
    }

    #[test]
    fn test_format_serde_round_trip() {
        let json = serde_json::to_string(&PriceFormat::Share01).unwrap();
        assert_eq!(json, "\"share_0_1\"");
        let back: PriceFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PriceFormat::Share01);
    }
}
