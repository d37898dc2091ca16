//! Full-database detection scan.

use anyhow::Result;
use tracing::info;

use sportsarb_core::config::DetectionPolicy;
use sportsarb_data::repositories::event_repo;
use sportsarb_data::Database;

use crate::detector::ArbDetector;

/// Runs detection over every sporting event and returns the number of
/// opportunities created.
///
/// The whole scan is one unit of work: every event's reads and writes share
/// a single transaction that commits once at the end, so a failure anywhere
/// rolls back the entire pass.
///
/// # Errors
/// Returns an error if any event's detection or the final commit fails.
pub async fn scan_all(db: &Database, policy: &DetectionPolicy) -> Result<u64> {
    let detector = ArbDetector::new(policy.clone());
    let mut tx = db.begin().await?;

    let events = event_repo::list(&mut tx, None).await?;
    let mut total: u64 = 0;
    for event in &events {
        let created = detector.detect_for_event(&mut tx, event).await?;
        total += created.len() as u64;
    }

    tx.commit().await?;
    info!(events = events.len(), opportunities = total, "arbitrage scan complete");
    Ok(total)
}
