//! Quote repository.

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection};

use sportsarb_core::fees::FeeModel;

use crate::models::Quote;

/// Returns the latest quote per outcome id, keyed by outcome id.
///
/// Exactly one row survives per outcome; ties on identical timestamps are
/// broken by whatever row `DISTINCT ON` sees first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn latest_for_outcomes(
    conn: &mut PgConnection,
    outcome_ids: &[i32],
) -> Result<HashMap<i32, Quote>> {
    if outcome_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let quotes = sqlx::query_as::<_, Quote>(
        r"
        SELECT DISTINCT ON (market_outcome_id) *
        FROM quotes
        WHERE market_outcome_id = ANY($1)
        ORDER BY market_outcome_id, timestamp DESC
        ",
    )
    .bind(outcome_ids)
    .fetch_all(conn)
    .await?;

    Ok(quotes
        .into_iter()
        .map(|q| (q.market_outcome_id, q))
        .collect())
}

/// A quote joined with its outcome and market context, as served by the API.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteWithContext {
    pub quote_id: i32,
    pub timestamp: DateTime<Utc>,
    pub venue_id: String,
    pub market_id: i32,
    pub market_outcome_id: i32,
    pub outcome_label: String,
    pub raw_price: Option<Decimal>,
    pub price_format: Option<String>,
    pub share_price: Option<Decimal>,
    pub win_pnl: Option<Decimal>,
    pub lose_pnl: Option<Decimal>,
}

/// Lists recent quotes, optionally scoped to a market or a sports event.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_recent(
    conn: &mut PgConnection,
    market_id: Option<i32>,
    sports_event_id: Option<i32>,
    limit: i64,
) -> Result<Vec<QuoteWithContext>> {
    let quotes = sqlx::query_as::<_, QuoteWithContext>(
        r"
        SELECT q.id AS quote_id,
               q.timestamp,
               m.venue_id,
               m.id AS market_id,
               mo.id AS market_outcome_id,
               mo.label AS outcome_label,
               q.raw_price,
               q.price_format,
               q.share_price,
               q.net_pnl_if_win_per_share AS win_pnl,
               q.net_pnl_if_lose_per_share AS lose_pnl
        FROM quotes q
        JOIN market_outcomes mo ON mo.id = q.market_outcome_id
        JOIN markets m ON m.id = mo.market_id
        WHERE ($1::int IS NULL OR mo.market_id = $1)
          AND ($2::int IS NULL OR m.sports_event_id = $2)
        ORDER BY q.timestamp DESC
        LIMIT $3
        ",
    )
    .bind(market_id)
    .bind(sports_event_id)
    .bind(limit)
    .fetch_all(conn)
    .await?;
    Ok(quotes)
}

/// A quote paired with its venue's fee model, for re-materialization.
#[derive(Debug, Clone, FromRow)]
pub struct QuoteForMaterialize {
    #[sqlx(flatten)]
    pub quote: Quote,
    pub venue_fee_model: Option<Json<FeeModel>>,
}

/// Loads every quote with its venue fee model.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn all_for_materialize(conn: &mut PgConnection) -> Result<Vec<QuoteForMaterialize>> {
    let rows = sqlx::query_as::<_, QuoteForMaterialize>(
        r"
        SELECT q.*, v.fee_model AS venue_fee_model
        FROM quotes q
        JOIN market_outcomes mo ON mo.id = q.market_outcome_id
        JOIN markets m ON m.id = mo.market_id
        JOIN venues v ON v.id = m.venue_id
        ORDER BY q.id
        ",
    )
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

/// Writes a quote's derived pricing fields. All five columns update together
/// so the row never holds a partial derivation.
///
/// # Errors
/// Returns an error if the database operation fails.
pub async fn update_derived(conn: &mut PgConnection, quote: &Quote) -> Result<()> {
    sqlx::query(
        r"
        UPDATE quotes
        SET share_price = $2,
            decimal_odds = $3,
            implied_prob_raw = $4,
            net_pnl_if_win_per_share = $5,
            net_pnl_if_lose_per_share = $6
        WHERE id = $1
        ",
    )
    .bind(quote.id)
    .bind(quote.share_price)
    .bind(quote.decimal_odds)
    .bind(quote.implied_prob_raw)
    .bind(quote.net_pnl_if_win_per_share)
    .bind(quote.net_pnl_if_lose_per_share)
    .execute(conn)
    .await?;
    Ok(())
}
