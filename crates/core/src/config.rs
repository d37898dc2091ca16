//! Application configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::fees::FeeModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub detection: DetectionPolicy,
    /// Venues seeded by `sync-venues`; fee models change only here.
    #[serde(default)]
    pub venues: Vec<VenueSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Policy thresholds gating which riskless combinations get recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionPolicy {
    /// Minimum worst-case ROI for an opportunity to be persisted.
    pub min_worst_case_roi: Decimal,
    /// Minimum aggregate stake for an opportunity to be persisted.
    pub min_total_stake: Decimal,
    /// Declared cap per leg. Not enforced during sizing; kept so operators
    /// can configure it ahead of an execution layer that would honor it.
    pub max_stake_per_leg: Decimal,
}

impl Default for DetectionPolicy {
    fn default() -> Self {
        Self {
            min_worst_case_roi: dec!(0.005),
            min_total_stake: dec!(10.0),
            max_stake_per_leg: dec!(50.0),
        }
    }
}

/// One venue as declared in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueSeed {
    pub id: String,
    pub name: String,
    #[serde(default = "default_currency")]
    pub base_currency: String,
    #[serde(default)]
    pub fee_model: Option<FeeModel>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/sportsarb".to_string(),
                max_connections: 10,
            },
            detection: DetectionPolicy::default(),
            venues: Vec::new(),
        }
    }
}
