//! Core domain types and pure math for the sportsarb system.
//!
//! This crate holds everything the arbitrage engine needs that does not touch
//! storage or the network: the price-format and outcome-label vocabularies,
//! venue fee models, odds normalization, per-share payoff math, and the
//! application configuration.

pub mod config;
pub mod config_loader;
pub mod error;
pub mod fees;
pub mod odds;
pub mod outcome;
pub mod payoffs;

pub use config::{AppConfig, DatabaseConfig, DetectionPolicy, ServerConfig, VenueSeed};
pub use config_loader::ConfigLoader;
pub use error::OddsError;
pub use fees::FeeModel;
pub use odds::{normalize, PriceFormat};
pub use outcome::OutcomeLabel;
pub use payoffs::{compute_payoff_long, Payoff};
