//! Market and market-outcome repository.

use anyhow::Result;
use sqlx::PgConnection;

use crate::models::{Market, MarketOutcome};

/// Loads the markets attached to an event, through either the direct foreign
/// key or an explicit event-market link record.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn for_event(conn: &mut PgConnection, event_id: i32) -> Result<Vec<Market>> {
    let markets = sqlx::query_as::<_, Market>(
        r"
        SELECT m.* FROM markets m
        WHERE m.sports_event_id = $1
        UNION
        SELECT m.* FROM markets m
        JOIN event_market_links l ON l.market_id = m.id
        WHERE l.sports_event_id = $1
        ",
    )
    .bind(event_id)
    .fetch_all(conn)
    .await?;
    Ok(markets)
}

/// Lists markets, optionally filtered by venue and by the sport of the
/// directly linked event. Capped at 200 rows, oldest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list(
    conn: &mut PgConnection,
    venue_id: Option<&str>,
    sport: Option<&str>,
) -> Result<Vec<Market>> {
    let markets = sqlx::query_as::<_, Market>(
        r"
        SELECT m.* FROM markets m
        LEFT JOIN sports_events e ON e.id = m.sports_event_id
        WHERE ($1::text IS NULL OR m.venue_id = $1)
          AND ($2::text IS NULL OR e.sport = $2)
        ORDER BY m.id ASC
        LIMIT 200
        ",
    )
    .bind(venue_id)
    .bind(sport)
    .fetch_all(conn)
    .await?;
    Ok(markets)
}

/// Loads all outcomes for a set of markets.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn outcomes_for_markets(
    conn: &mut PgConnection,
    market_ids: &[i32],
) -> Result<Vec<MarketOutcome>> {
    if market_ids.is_empty() {
        return Ok(Vec::new());
    }
    let outcomes = sqlx::query_as::<_, MarketOutcome>(
        "SELECT * FROM market_outcomes WHERE market_id = ANY($1) ORDER BY id",
    )
    .bind(market_ids)
    .fetch_all(conn)
    .await?;
    Ok(outcomes)
}
