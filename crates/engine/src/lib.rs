//! Cross-venue arbitrage detection.
//!
//! Given a sporting event whose markets are quoted on multiple venues, the
//! engine selects the cheapest eligible leg per canonical outcome label,
//! solves for a riskless stake combination on the recognized outcome-group
//! shapes, applies the profitability policy, and records qualifying
//! opportunities with their legs.
//!
//! The detection math ([`detector::detect_event`] and everything under
//! [`legs`] and [`solver`]) is pure and operates on an in-memory snapshot;
//! storage only appears at the edges, where the snapshot is loaded and
//! accepted opportunities are persisted.

pub mod detector;
pub mod legs;
pub mod materializer;
pub mod scanner;
pub mod solver;

pub use detector::{
    detect_event, ArbDetector, EventSnapshot, OpportunityCandidate, DETECTION_VERSION,
};
pub use legs::{effective_cost, select_best_leg, Leg, OutcomeQuote};
pub use materializer::materialize_quote;
pub use scanner::scan_all;
pub use solver::{check_equal_stakes_three_way, solve_two_way, ThreeWaySolution, TwoWaySolution};
