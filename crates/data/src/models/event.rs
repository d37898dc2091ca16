use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A canonical real-world sporting event.
///
/// Created by mapping/ingestion; read-only to the detector.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SportsEvent {
    pub id: i32,
    pub sport: String,
    pub league: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub event_start_time_utc: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub canonical_name: String,
    pub status: String,
    pub source: Option<String>,
    pub external_event_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
