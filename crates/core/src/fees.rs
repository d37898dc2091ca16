//! Venue fee models.
//!
//! Each venue carries at most one fee schedule, stored as tagged JSON on the
//! venue row and deserialized into [`FeeModel`] where payoff math consumes
//! it. Fee models are configuration: the detector only ever reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A venue's fee schedule, dispatched by the JSON `type` tag.
///
/// Tags outside the known set deserialize to [`FeeModel::Unknown`], which the
/// payoff calculator treats the same as no fee model at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeeModel {
    /// Commission taken on profit only (Betfair-style exchanges).
    ProfitCommission {
        #[serde(default)]
        commission_rate: Decimal,
    },
    /// Fee applied to the full cost basis regardless of outcome.
    TurnoverFee {
        #[serde(default)]
        turnover_rate: Decimal,
    },
    /// Flat per-share trading and settlement fees (Kalshi-style).
    PerContract {
        #[serde(default)]
        trading_fee: Decimal,
        #[serde(default)]
        settlement_fee: Decimal,
        /// Parsed for completeness; not applied to per-share economics.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fee_cap: Option<Decimal>,
    },
    /// Unrecognized fee tag.
    #[serde(other)]
    Unknown,
}
