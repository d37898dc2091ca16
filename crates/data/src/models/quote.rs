use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A timestamped price observation for one market outcome.
///
/// Quotes are append-only; the "current" price for an outcome is the quote
/// with the maximum timestamp. The derived fields (`share_price` through
/// `implied_prob_raw`) are a pure function of the raw price, its format, and
/// the venue fee model, and are always written together.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quote {
    pub id: i32,
    pub market_outcome_id: i32,
    pub timestamp: DateTime<Utc>,
    pub raw_price: Option<Decimal>,
    pub price_format: Option<String>,
    pub bid_price: Option<Decimal>,
    pub ask_price: Option<Decimal>,
    pub source: Option<String>,
    pub share_price: Option<Decimal>,
    pub net_pnl_if_win_per_share: Option<Decimal>,
    pub net_pnl_if_lose_per_share: Option<Decimal>,
    pub decimal_odds: Option<Decimal>,
    pub implied_prob_raw: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}
