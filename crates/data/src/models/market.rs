use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx::FromRow;

use sportsarb_core::outcome::OutcomeLabel;

/// A venue-specific tradable question, e.g. "Team A wins".
///
/// The `parsed_*` columns are written by the mapping pipeline and only ever
/// read here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Market {
    pub id: i32,
    pub venue_id: String,
    pub sports_event_id: Option<i32>,
    pub venue_market_key: String,
    pub market_type: String,
    pub question_text: String,
    pub outcome_group: Option<String>,
    pub listing_time_utc: Option<DateTime<Utc>>,
    pub expiration_time_utc: Option<DateTime<Utc>>,
    pub settlement_time_utc: Option<DateTime<Utc>>,
    pub status: String,
    pub parsed_sport: Option<String>,
    pub parsed_league: Option<String>,
    pub parsed_home_team: Option<String>,
    pub parsed_away_team: Option<String>,
    pub parsed_start_time_hint: Option<DateTime<Utc>>,
    pub parsed_metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One settleable outcome of a market.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MarketOutcome {
    pub id: i32,
    pub market_id: i32,
    /// Stored label string; outcomes outside the canonical vocabulary are
    /// invisible to the detector.
    pub label: String,
    pub display_name: String,
    pub line: Option<Decimal>,
    pub side: Option<String>,
    pub group_id: Option<String>,
    pub is_exhaustive_group: bool,
    pub settlement_value: Option<i32>,
    pub settled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MarketOutcome {
    /// Returns the canonical label, or `None` when the stored label is
    /// outside the vocabulary.
    #[must_use]
    pub fn canonical_label(&self) -> Option<OutcomeLabel> {
        OutcomeLabel::parse(&self.label)
    }
}
