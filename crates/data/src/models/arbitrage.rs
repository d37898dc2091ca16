use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A detected riskless stake combination for one event, market type, and
/// outcome group.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArbitrageOpportunity {
    pub id: i32,
    pub sports_event_id: i32,
    pub market_type: String,
    pub outcome_group: Option<String>,
    pub detected_at: DateTime<Utc>,
    pub num_outcomes: i32,
    pub total_stake: Decimal,
    pub worst_case_pnl: Decimal,
    pub best_case_pnl: Decimal,
    pub worst_case_roi: Decimal,
    pub status: String,
    pub detection_version: Option<String>,
    pub notes: Option<String>,
}

/// One venue/outcome position inside an opportunity. Immutable once written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArbitrageLeg {
    pub id: i32,
    pub arbitrage_opportunity_id: i32,
    pub venue_id: String,
    pub market_outcome_id: i32,
    pub outcome_label: String,
    pub stake_shares: Decimal,
    pub share_price: Decimal,
    pub win_pnl_per_share: Decimal,
    pub lose_pnl_per_share: Decimal,
    pub source_quote_id: Option<i32>,
}

/// Insert payload for an opportunity row.
#[derive(Debug, Clone)]
pub struct NewOpportunity {
    pub sports_event_id: i32,
    pub market_type: String,
    pub outcome_group: Option<String>,
    pub detected_at: DateTime<Utc>,
    pub num_outcomes: i32,
    pub total_stake: Decimal,
    pub worst_case_pnl: Decimal,
    pub best_case_pnl: Decimal,
    pub worst_case_roi: Decimal,
    pub status: String,
    pub detection_version: Option<String>,
}

/// Insert payload for a leg row.
#[derive(Debug, Clone)]
pub struct NewLeg {
    pub arbitrage_opportunity_id: i32,
    pub venue_id: String,
    pub market_outcome_id: i32,
    pub outcome_label: String,
    pub stake_shares: Decimal,
    pub share_price: Decimal,
    pub win_pnl_per_share: Decimal,
    pub lose_pnl_per_share: Decimal,
    pub source_quote_id: Option<i32>,
}
