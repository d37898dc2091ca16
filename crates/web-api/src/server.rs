use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use sportsarb_core::config::DetectionPolicy;
use sportsarb_data::Database;

use crate::handlers;

/// Shared state for all request handlers.
pub struct AppState {
    pub db: Database,
    pub policy: DetectionPolicy,
}

pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    #[must_use]
    pub fn new(db: Database, policy: DetectionPolicy) -> Self {
        Self {
            state: Arc::new(AppState { db, policy }),
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/api/arbs/scan", post(handlers::scan_arbs))
            .route("/api/arbs", get(handlers::list_arbs))
            .route("/api/arbs/:arb_id", get(handlers::get_arb))
            .route("/api/sports-events", get(handlers::list_sports_events))
            .route("/api/sports-events/:event_id", get(handlers::get_sports_event))
            .route("/api/markets", get(handlers::list_markets))
            .route("/api/quotes", get(handlers::list_quotes))
            .route("/api/venues", get(handlers::list_venues))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Starts the API server listening on the specified address.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the address or serve
    /// requests.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("sportsarb API listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}
