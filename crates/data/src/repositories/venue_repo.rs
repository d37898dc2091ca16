//! Venue repository.

use anyhow::Result;
use sqlx::types::Json;
use sqlx::PgConnection;

use sportsarb_core::config::VenueSeed;

use crate::models::Venue;

/// Idempotently upserts a configured venue. Fee models are configuration
/// input only, so conflicts overwrite the stored row.
///
/// # Errors
/// Returns an error if the database operation fails.
pub async fn upsert(conn: &mut PgConnection, seed: &VenueSeed) -> Result<Venue> {
    let venue = sqlx::query_as::<_, Venue>(
        r"
        INSERT INTO venues (id, name, base_currency, fee_model, created_at, updated_at)
        VALUES ($1, $2, $3, $4, now(), now())
        ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                base_currency = EXCLUDED.base_currency,
                fee_model = EXCLUDED.fee_model,
                updated_at = now()
        RETURNING *
        ",
    )
    .bind(&seed.id)
    .bind(&seed.name)
    .bind(&seed.base_currency)
    .bind(seed.fee_model.as_ref().map(Json))
    .fetch_one(conn)
    .await?;

    Ok(venue)
}

/// Lists all venues.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list(conn: &mut PgConnection) -> Result<Vec<Venue>> {
    let venues = sqlx::query_as::<_, Venue>("SELECT * FROM venues ORDER BY id")
        .fetch_all(conn)
        .await?;
    Ok(venues)
}
