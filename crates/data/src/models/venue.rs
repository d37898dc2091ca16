use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use sportsarb_core::fees::FeeModel;

/// A trading venue and its fee schedule.
///
/// Rows are created and updated only by `sync-venues` configuration; the
/// detector reads them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub base_currency: String,
    pub fee_model: Option<Json<FeeModel>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Venue {
    /// Returns the typed fee model, if one is configured.
    #[must_use]
    pub fn fee_model(&self) -> Option<&FeeModel> {
        self.fee_model.as_ref().map(|json| &json.0)
    }
}
