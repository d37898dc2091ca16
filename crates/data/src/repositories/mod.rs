//! Repository functions, one module per aggregate.
//!
//! Every function takes `&mut PgConnection` so the caller decides the unit
//! of work: pass a pooled connection for one-shot reads, or a transaction
//! for a batch that must commit or roll back as a whole.

pub mod arb_repo;
pub mod event_repo;
pub mod market_repo;
pub mod quote_repo;
pub mod venue_repo;
