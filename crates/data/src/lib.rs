//! PostgreSQL persistence for the sportsarb system.
//!
//! Repository modules expose async functions over `&mut PgConnection` so a
//! single `sqlx::Transaction` can serve as the explicit unit of work for a
//! whole scan or ingestion batch: the orchestrator begins it, every read and
//! write inside the batch runs on it, and it commits (or rolls back) once.

pub mod database;
pub mod models;
pub mod repositories;

pub use database::Database;
