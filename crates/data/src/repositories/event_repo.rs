//! Sports event repository.

use anyhow::Result;
use sqlx::PgConnection;

use crate::models::SportsEvent;

/// Lists events, optionally filtered by sport, soonest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list(conn: &mut PgConnection, sport: Option<&str>) -> Result<Vec<SportsEvent>> {
    let events = sqlx::query_as::<_, SportsEvent>(
        r"
        SELECT * FROM sports_events
        WHERE ($1::text IS NULL OR sport = $1)
        ORDER BY event_start_time_utc ASC NULLS LAST
        ",
    )
    .bind(sport)
    .fetch_all(conn)
    .await?;
    Ok(events)
}

/// Fetches an event by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get(conn: &mut PgConnection, event_id: i32) -> Result<Option<SportsEvent>> {
    let event = sqlx::query_as::<_, SportsEvent>("SELECT * FROM sports_events WHERE id = $1")
        .bind(event_id)
        .fetch_optional(conn)
        .await?;
    Ok(event)
}
