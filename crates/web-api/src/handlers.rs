use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sportsarb_data::models::{ArbitrageLeg, ArbitrageOpportunity, SportsEvent, Venue};
use sportsarb_data::repositories::{arb_repo, event_repo, market_repo, quote_repo, venue_repo};
use sportsarb_engine::scan_all;

use crate::server::AppState;

fn internal_error(err: anyhow::Error) -> StatusCode {
    tracing::error!("request failed: {err:#}");
    StatusCode::INTERNAL_SERVER_ERROR
}

#[derive(Serialize)]
pub struct ScanResponse {
    pub detected_opportunities: u64,
}

/// Runs a detection pass over all events.
///
/// # Errors
/// Returns `StatusCode::INTERNAL_SERVER_ERROR` if the scan fails; the whole
/// pass rolls back in that case.
pub async fn scan_arbs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScanResponse>, StatusCode> {
    let detected = scan_all(&state.db, &state.policy)
        .await
        .map_err(internal_error)?;
    Ok(Json(ScanResponse {
        detected_opportunities: detected,
    }))
}

#[derive(Deserialize)]
pub struct ArbListQuery {
    pub min_roi: Option<Decimal>,
    pub limit: Option<i64>,
}

/// Lists detected opportunities, newest first.
///
/// # Errors
/// Returns `StatusCode::INTERNAL_SERVER_ERROR` if the query fails.
pub async fn list_arbs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArbListQuery>,
) -> Result<Json<Vec<ArbitrageOpportunity>>, StatusCode> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let mut conn = state
        .db
        .pool()
        .acquire()
        .await
        .map_err(|e| internal_error(e.into()))?;
    let opportunities = arb_repo::list(&mut conn, query.min_roi, limit)
        .await
        .map_err(internal_error)?;
    Ok(Json(opportunities))
}

#[derive(Serialize)]
pub struct ArbDetailResponse {
    #[serde(flatten)]
    pub opportunity: ArbitrageOpportunity,
    pub legs: Vec<ArbitrageLeg>,
}

/// Fetches one opportunity with its legs.
///
/// # Errors
/// Returns `StatusCode::NOT_FOUND` if the opportunity doesn't exist, or
/// `StatusCode::INTERNAL_SERVER_ERROR` if the query fails.
pub async fn get_arb(
    State(state): State<Arc<AppState>>,
    Path(arb_id): Path<i32>,
) -> Result<Json<ArbDetailResponse>, StatusCode> {
    let mut conn = state
        .db
        .pool()
        .acquire()
        .await
        .map_err(|e| internal_error(e.into()))?;
    let opportunity = arb_repo::get(&mut conn, arb_id)
        .await
        .map_err(internal_error)?
        .ok_or(StatusCode::NOT_FOUND)?;
    let legs = arb_repo::legs_for(&mut conn, opportunity.id)
        .await
        .map_err(internal_error)?;
    Ok(Json(ArbDetailResponse { opportunity, legs }))
}

#[derive(Deserialize)]
pub struct EventListQuery {
    pub sport: Option<String>,
}

/// Lists sporting events, soonest first.
///
/// # Errors
/// Returns `StatusCode::INTERNAL_SERVER_ERROR` if the query fails.
pub async fn list_sports_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<Vec<SportsEvent>>, StatusCode> {
    let mut conn = state
        .db
        .pool()
        .acquire()
        .await
        .map_err(|e| internal_error(e.into()))?;
    let events = event_repo::list(&mut conn, query.sport.as_deref())
        .await
        .map_err(internal_error)?;
    Ok(Json(events))
}

#[derive(Serialize)]
pub struct MarketSummary {
    pub id: i32,
    pub venue_id: String,
    pub sports_event_id: Option<i32>,
    pub venue_market_key: String,
    pub market_type: String,
    pub question_text: String,
    pub status: String,
}

impl From<sportsarb_data::models::Market> for MarketSummary {
    fn from(m: sportsarb_data::models::Market) -> Self {
        Self {
            id: m.id,
            venue_id: m.venue_id,
            sports_event_id: m.sports_event_id,
            venue_market_key: m.venue_market_key,
            market_type: m.market_type,
            question_text: m.question_text,
            status: m.status,
        }
    }
}

#[derive(Deserialize)]
pub struct MarketListQuery {
    pub venue_id: Option<String>,
    pub sport: Option<String>,
}

/// Lists markets, optionally filtered by venue and event sport.
///
/// # Errors
/// Returns `StatusCode::INTERNAL_SERVER_ERROR` if the query fails.
pub async fn list_markets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketListQuery>,
) -> Result<Json<Vec<MarketSummary>>, StatusCode> {
    let mut conn = state
        .db
        .pool()
        .acquire()
        .await
        .map_err(|e| internal_error(e.into()))?;
    let markets = market_repo::list(&mut conn, query.venue_id.as_deref(), query.sport.as_deref())
        .await
        .map_err(internal_error)?;
    Ok(Json(markets.into_iter().map(MarketSummary::from).collect()))
}

#[derive(Serialize)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: SportsEvent,
    pub markets: Vec<MarketSummary>,
}

/// Fetches one event with its linked markets.
///
/// # Errors
/// Returns `StatusCode::NOT_FOUND` if the event doesn't exist, or
/// `StatusCode::INTERNAL_SERVER_ERROR` if the query fails.
pub async fn get_sports_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i32>,
) -> Result<Json<EventDetailResponse>, StatusCode> {
    let mut conn = state
        .db
        .pool()
        .acquire()
        .await
        .map_err(|e| internal_error(e.into()))?;
    let event = event_repo::get(&mut conn, event_id)
        .await
        .map_err(internal_error)?
        .ok_or(StatusCode::NOT_FOUND)?;
    let markets = market_repo::for_event(&mut conn, event.id)
        .await
        .map_err(internal_error)?
        .into_iter()
        .map(MarketSummary::from)
        .collect();
    Ok(Json(EventDetailResponse { event, markets }))
}

#[derive(Deserialize)]
pub struct QuoteListQuery {
    pub market_id: Option<i32>,
    pub sports_event_id: Option<i32>,
    pub limit: Option<i64>,
}

/// Lists recent quotes with their outcome and market context.
///
/// # Errors
/// Returns `StatusCode::INTERNAL_SERVER_ERROR` if the query fails.
pub async fn list_quotes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<QuoteListQuery>,
) -> Result<Json<Vec<quote_repo::QuoteWithContext>>, StatusCode> {
    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let mut conn = state
        .db
        .pool()
        .acquire()
        .await
        .map_err(|e| internal_error(e.into()))?;
    let quotes = quote_repo::list_recent(&mut conn, query.market_id, query.sports_event_id, limit)
        .await
        .map_err(internal_error)?;
    Ok(Json(quotes))
}

/// Lists configured venues and their fee models.
///
/// # Errors
/// Returns `StatusCode::INTERNAL_SERVER_ERROR` if the query fails.
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Venue>>, StatusCode> {
    let mut conn = state
        .db
        .pool()
        .acquire()
        .await
        .map_err(|e| internal_error(e.into()))?;
    let venues = venue_repo::list(&mut conn).await.map_err(internal_error)?;
    Ok(Json(venues))
}
