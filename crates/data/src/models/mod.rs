pub mod arbitrage;
pub mod event;
pub mod market;
pub mod quote;
pub mod venue;

pub use arbitrage::{ArbitrageLeg, ArbitrageOpportunity, NewLeg, NewOpportunity};
pub use event::SportsEvent;
pub use market::{Market, MarketOutcome};
pub use quote::Quote;
pub use venue::Venue;
