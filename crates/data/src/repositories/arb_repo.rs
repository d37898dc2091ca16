//! Arbitrage opportunity repository.

use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::models::{ArbitrageLeg, ArbitrageOpportunity, NewLeg, NewOpportunity};

/// Inserts an opportunity row and returns it.
///
/// Detection is at-least-once: there is no uniqueness constraint on
/// (event, market type, outcome group), so re-running a scan on unchanged
/// data records the combination again.
///
/// # Errors
/// Returns an error if the database operation fails.
pub async fn insert_opportunity(
    conn: &mut PgConnection,
    new: &NewOpportunity,
) -> Result<ArbitrageOpportunity> {
    let opportunity = sqlx::query_as::<_, ArbitrageOpportunity>(
        r"
        INSERT INTO arbitrage_opportunities
            (sports_event_id, market_type, outcome_group, detected_at, num_outcomes,
             total_stake, worst_case_pnl, best_case_pnl, worst_case_roi, status,
             detection_version)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        ",
    )
    .bind(new.sports_event_id)
    .bind(&new.market_type)
    .bind(&new.outcome_group)
    .bind(new.detected_at)
    .bind(new.num_outcomes)
    .bind(new.total_stake)
    .bind(new.worst_case_pnl)
    .bind(new.best_case_pnl)
    .bind(new.worst_case_roi)
    .bind(&new.status)
    .bind(&new.detection_version)
    .fetch_one(conn)
    .await?;

    Ok(opportunity)
}

/// Inserts one leg of an opportunity.
///
/// # Errors
/// Returns an error if the database operation fails.
pub async fn insert_leg(conn: &mut PgConnection, new: &NewLeg) -> Result<ArbitrageLeg> {
    let leg = sqlx::query_as::<_, ArbitrageLeg>(
        r"
        INSERT INTO arbitrage_legs
            (arbitrage_opportunity_id, venue_id, market_outcome_id, outcome_label,
             stake_shares, share_price, win_pnl_per_share, lose_pnl_per_share,
             source_quote_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        ",
    )
    .bind(new.arbitrage_opportunity_id)
    .bind(&new.venue_id)
    .bind(new.market_outcome_id)
    .bind(&new.outcome_label)
    .bind(new.stake_shares)
    .bind(new.share_price)
    .bind(new.win_pnl_per_share)
    .bind(new.lose_pnl_per_share)
    .bind(new.source_quote_id)
    .fetch_one(conn)
    .await?;

    Ok(leg)
}

/// Lists opportunities newest first, optionally gated by a minimum ROI.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list(
    conn: &mut PgConnection,
    min_roi: Option<Decimal>,
    limit: i64,
) -> Result<Vec<ArbitrageOpportunity>> {
    let opportunities = sqlx::query_as::<_, ArbitrageOpportunity>(
        r"
        SELECT * FROM arbitrage_opportunities
        WHERE ($1::numeric IS NULL OR worst_case_roi >= $1)
        ORDER BY detected_at DESC
        LIMIT $2
        ",
    )
    .bind(min_roi)
    .bind(limit)
    .fetch_all(conn)
    .await?;
    Ok(opportunities)
}

/// Fetches one opportunity by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get(conn: &mut PgConnection, id: i32) -> Result<Option<ArbitrageOpportunity>> {
    let opportunity =
        sqlx::query_as::<_, ArbitrageOpportunity>("SELECT * FROM arbitrage_opportunities WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(opportunity)
}

/// Loads the legs of an opportunity.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn legs_for(conn: &mut PgConnection, opportunity_id: i32) -> Result<Vec<ArbitrageLeg>> {
    let legs = sqlx::query_as::<_, ArbitrageLeg>(
        "SELECT * FROM arbitrage_legs WHERE arbitrage_opportunity_id = $1 ORDER BY id",
    )
    .bind(opportunity_id)
    .fetch_all(conn)
    .await?;
    Ok(legs)
}
