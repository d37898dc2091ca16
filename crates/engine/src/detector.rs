//! Arbitrage detection for one sporting event.
//!
//! [`detect_event`] is the pure core: it walks the canonical labels, keeps
//! the cheapest eligible leg per label, runs the two-way solve on each
//! recognized pair and the equal-stake check on home/draw/away, then applies
//! the profitability policy. The shape checks are independent, so one event
//! can yield up to four opportunities in a single pass.
//!
//! [`ArbDetector`] wraps the pure core with storage: it loads the event
//! snapshot through the repositories and persists accepted candidates on the
//! caller's unit of work.

use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use tracing::{debug, info};

use sportsarb_core::config::DetectionPolicy;
use sportsarb_core::outcome::OutcomeLabel;
use sportsarb_data::models::{ArbitrageOpportunity, NewLeg, NewOpportunity, SportsEvent};
use sportsarb_data::repositories::{arb_repo, market_repo, quote_repo};

use crate::legs::{select_best_leg, Leg, OutcomeQuote};
use crate::solver::{check_equal_stakes_three_way, solve_two_way};

/// Version tag written onto every persisted opportunity.
pub const DETECTION_VERSION: &str = "v1";

/// Status assigned to freshly detected opportunities.
const STATUS_OPEN: &str = "open";

/// The two-way outcome-group shapes, as (market type, outcome group, leg A
/// label, leg B label).
const TWO_WAY_SHAPES: [(&str, &str, OutcomeLabel, OutcomeLabel); 3] = [
    ("moneyline", "home_away", OutcomeLabel::HomeWin, OutcomeLabel::AwayWin),
    ("binary", "yes_no", OutcomeLabel::Yes, OutcomeLabel::No),
    ("total", "over_under", OutcomeLabel::Over, OutcomeLabel::Under),
];

// =============================================================================
// Event Snapshot
// =============================================================================

/// Everything detection needs about one event, already loaded from storage.
#[derive(Debug, Clone)]
pub struct EventSnapshot {
    pub event_id: i32,
    pub outcomes: Vec<OutcomeQuote>,
}

// =============================================================================
// Candidates
// =============================================================================

/// An accepted riskless combination, not yet persisted.
#[derive(Debug, Clone)]
pub struct OpportunityCandidate {
    pub market_type: &'static str,
    pub outcome_group: &'static str,
    pub legs: Vec<Leg>,
    pub stakes: Vec<Decimal>,
    pub state_pnls: Vec<Decimal>,
    pub total_stake: Decimal,
    pub worst_case_pnl: Decimal,
    pub best_case_pnl: Decimal,
    pub worst_case_roi: Decimal,
}

/// Applies the profitability policy to a solved combination.
///
/// Total stake is the effective-cost-weighted sum of the leg stakes. Returns
/// `None` when the stake is non-positive, below the minimum, or the
/// worst-case ROI misses the floor. `max_stake_per_leg` is not consulted.
fn gate_candidate(
    policy: &DetectionPolicy,
    market_type: &'static str,
    outcome_group: &'static str,
    legs: Vec<Leg>,
    stakes: Vec<Decimal>,
    state_pnls: Vec<Decimal>,
) -> Option<OpportunityCandidate> {
    let total_stake: Decimal = legs
        .iter()
        .zip(&stakes)
        .map(|(leg, stake)| *stake * leg.effective_cost)
        .sum();
    if total_stake <= Decimal::ZERO {
        return None;
    }

    let worst_case_pnl = state_pnls.iter().copied().min()?;
    let best_case_pnl = state_pnls.iter().copied().max()?;
    let worst_case_roi = worst_case_pnl / total_stake;

    if worst_case_roi < policy.min_worst_case_roi || total_stake < policy.min_total_stake {
        debug!(
            market_type,
            outcome_group,
            %worst_case_roi,
            %total_stake,
            "candidate below policy thresholds, discarding"
        );
        return None;
    }

    Some(OpportunityCandidate {
        market_type,
        outcome_group,
        legs,
        stakes,
        state_pnls,
        total_stake,
        worst_case_pnl,
        best_case_pnl,
        worst_case_roi,
    })
}

/// Detects riskless back-all-outcomes combinations in an event snapshot.
///
/// Pure function over the snapshot: no storage, no clocks.
#[must_use]
pub fn detect_event(
    snapshot: &EventSnapshot,
    policy: &DetectionPolicy,
) -> Vec<OpportunityCandidate> {
    let mut legs_by_label: HashMap<OutcomeLabel, Leg> = HashMap::new();
    for label in OutcomeLabel::CANONICAL {
        if let Some(leg) = select_best_leg(&snapshot.outcomes, label) {
            legs_by_label.insert(label, leg);
        }
    }

    let mut candidates = Vec::new();

    for (market_type, outcome_group, label_a, label_b) in TWO_WAY_SHAPES {
        let (Some(leg_a), Some(leg_b)) = (legs_by_label.get(&label_a), legs_by_label.get(&label_b))
        else {
            continue;
        };
        let Some(solution) = solve_two_way(leg_a, leg_b) else {
            continue;
        };
        if let Some(candidate) = gate_candidate(
            policy,
            market_type,
            outcome_group,
            vec![leg_a.clone(), leg_b.clone()],
            vec![solution.stake_a, solution.stake_b],
            vec![solution.pnl_a, solution.pnl_b],
        ) {
            candidates.push(candidate);
        }
    }

    if let (Some(home), Some(draw), Some(away)) = (
        legs_by_label.get(&OutcomeLabel::HomeWin),
        legs_by_label.get(&OutcomeLabel::Draw),
        legs_by_label.get(&OutcomeLabel::AwayWin),
    ) {
        let legs = [home.clone(), draw.clone(), away.clone()];
        if let Some(solution) = check_equal_stakes_three_way(&legs) {
            if let Some(candidate) = gate_candidate(
                policy,
                "moneyline",
                "home_draw_away",
                legs.to_vec(),
                solution.stakes.to_vec(),
                solution.pnls.to_vec(),
            ) {
                candidates.push(candidate);
            }
        }
    }

    candidates
}

// =============================================================================
// Storage-Aware Detector
// =============================================================================

/// Detector bound to a profitability policy.
#[derive(Debug, Clone)]
pub struct ArbDetector {
    policy: DetectionPolicy,
}

impl ArbDetector {
    /// Creates a detector with the given policy.
    #[must_use]
    pub fn new(policy: DetectionPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in force.
    #[must_use]
    pub fn policy(&self) -> &DetectionPolicy {
        &self.policy
    }

    /// Detects and persists arbitrage opportunities for one event on the
    /// caller's unit of work.
    ///
    /// An event with no linked markets produces no reads beyond the market
    /// lookup and no writes.
    ///
    /// # Errors
    /// Returns an error if any storage operation fails; the caller decides
    /// whether to roll back the surrounding transaction.
    pub async fn detect_for_event(
        &self,
        conn: &mut PgConnection,
        event: &SportsEvent,
    ) -> Result<Vec<ArbitrageOpportunity>> {
        let snapshot = match load_snapshot(conn, event.id).await? {
            Some(snapshot) => snapshot,
            None => return Ok(Vec::new()),
        };

        let candidates = detect_event(&snapshot, &self.policy);

        let mut created = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let opportunity = persist_candidate(conn, event.id, &candidate).await?;
            info!(
                event_id = event.id,
                opportunity_id = opportunity.id,
                market_type = candidate.market_type,
                outcome_group = candidate.outcome_group,
                worst_case_roi = %opportunity.worst_case_roi,
                "recorded arbitrage opportunity"
            );
            created.push(opportunity);
        }
        Ok(created)
    }
}

/// Loads the detection snapshot for an event, or `None` when the event has
/// no linked markets.
async fn load_snapshot(conn: &mut PgConnection, event_id: i32) -> Result<Option<EventSnapshot>> {
    let markets = market_repo::for_event(conn, event_id).await?;
    if markets.is_empty() {
        return Ok(None);
    }

    let market_ids: Vec<i32> = markets.iter().map(|m| m.id).collect();
    let outcomes = market_repo::outcomes_for_markets(conn, &market_ids).await?;
    let outcome_ids: Vec<i32> = outcomes.iter().map(|o| o.id).collect();
    let mut latest_quotes = quote_repo::latest_for_outcomes(conn, &outcome_ids).await?;

    let venue_by_market: HashMap<i32, &str> = markets
        .iter()
        .map(|m| (m.id, m.venue_id.as_str()))
        .collect();

    let outcomes = outcomes
        .iter()
        .filter_map(|outcome| {
            let venue_id = venue_by_market.get(&outcome.market_id)?;
            Some(OutcomeQuote {
                market_outcome_id: outcome.id,
                venue_id: (*venue_id).to_string(),
                label: outcome.canonical_label(),
                quote: latest_quotes.remove(&outcome.id),
            })
        })
        .collect();

    Ok(Some(EventSnapshot { event_id, outcomes }))
}

/// Writes one accepted candidate and its legs.
async fn persist_candidate(
    conn: &mut PgConnection,
    event_id: i32,
    candidate: &OpportunityCandidate,
) -> Result<ArbitrageOpportunity> {
    let opportunity = arb_repo::insert_opportunity(
        conn,
        &NewOpportunity {
            sports_event_id: event_id,
            market_type: candidate.market_type.to_string(),
            outcome_group: Some(candidate.outcome_group.to_string()),
            detected_at: Utc::now(),
            num_outcomes: candidate.legs.len() as i32,
            total_stake: candidate.total_stake,
            worst_case_pnl: candidate.worst_case_pnl,
            best_case_pnl: candidate.best_case_pnl,
            worst_case_roi: candidate.worst_case_roi,
            status: STATUS_OPEN.to_string(),
            detection_version: Some(DETECTION_VERSION.to_string()),
        },
    )
    .await?;

    for (leg, stake) in candidate.legs.iter().zip(&candidate.stakes) {
        arb_repo::insert_leg(
            conn,
            &NewLeg {
                arbitrage_opportunity_id: opportunity.id,
                venue_id: leg.venue_id.clone(),
                market_outcome_id: leg.market_outcome_id,
                outcome_label: leg.outcome_label.as_str().to_string(),
                stake_shares: *stake,
                share_price: leg.share_price,
                win_pnl_per_share: leg.win_pnl,
                lose_pnl_per_share: leg.lose_pnl,
                source_quote_id: leg.quote_id,
            },
        )
        .await?;
    }

    Ok(opportunity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sportsarb_data::models::Quote;

    fn policy() -> DetectionPolicy {
        DetectionPolicy {
            min_total_stake: dec!(0.1),
            ..DetectionPolicy::default()
        }
    }

    fn outcome_with_quote(
        id: i32,
        venue: &str,
        label: &str,
        share_price: Decimal,
        win: Decimal,
        lose: Decimal,
    ) -> OutcomeQuote {
        OutcomeQuote {
            market_outcome_id: id,
            venue_id: venue.to_string(),
            label: OutcomeLabel::parse(label),
            quote: Some(Quote {
                id: id * 100,
                market_outcome_id: id,
                timestamp: Utc::now(),
                raw_price: Some(share_price),
                price_format: Some("share_0_1".to_string()),
                bid_price: None,
                ask_price: None,
                source: None,
                share_price: Some(share_price),
                net_pnl_if_win_per_share: Some(win),
                net_pnl_if_lose_per_share: Some(lose),
                decimal_odds: None,
                implied_prob_raw: Some(share_price),
                created_at: Utc::now(),
            }),
        }
    }

    // ==================== Shape Detection Tests ====================

    #[test]
    fn test_detects_two_way_home_away() {
        let snapshot = EventSnapshot {
            event_id: 1,
            outcomes: vec![
                outcome_with_quote(1, "kalshi", "home_win", dec!(0.4), dec!(0.6), dec!(-0.4)),
                outcome_with_quote(2, "polymarket", "away_win", dec!(0.5), dec!(0.5), dec!(-0.5)),
            ],
        };

        let candidates = detect_event(&snapshot, &policy());
        assert_eq!(candidates.len(), 1);
        let candidate = &candidates[0];
        assert_eq!(candidate.market_type, "moneyline");
        assert_eq!(candidate.outcome_group, "home_away");
        assert_eq!(candidate.stakes, vec![dec!(1), dec!(1)]);
        assert_eq!(candidate.state_pnls, vec![dec!(0.1), dec!(0.1)]);
        // total stake = 1 * 0.4 + 1 * 0.5
        assert_eq!(candidate.total_stake, dec!(0.9));
        assert_eq!(candidate.worst_case_pnl, dec!(0.1));
    }

    #[test]
    fn test_no_opportunity_when_prices_overround() {
        let snapshot = EventSnapshot {
            event_id: 1,
            outcomes: vec![
                outcome_with_quote(1, "kalshi", "yes", dec!(0.55), dec!(0.45), dec!(-0.55)),
                outcome_with_quote(2, "polymarket", "no", dec!(0.55), dec!(0.45), dec!(-0.55)),
            ],
        };
        assert!(detect_event(&snapshot, &policy()).is_empty());
    }

    #[test]
    fn test_empty_snapshot_yields_nothing() {
        let snapshot = EventSnapshot {
            event_id: 1,
            outcomes: Vec::new(),
        };
        assert!(detect_event(&snapshot, &policy()).is_empty());
    }

    #[test]
    fn test_three_way_and_two_way_fire_independently() {
        // Home/draw/away priced so both the home/away pair solve and the
        // equal-stake three-way check succeed.
        let snapshot = EventSnapshot {
            event_id: 1,
            outcomes: vec![
                outcome_with_quote(1, "kalshi", "home_win", dec!(0.3), dec!(0.7), dec!(-0.3)),
                outcome_with_quote(2, "betfair", "draw", dec!(0.3), dec!(0.7), dec!(-0.3)),
                outcome_with_quote(3, "polymarket", "away_win", dec!(0.3), dec!(0.7), dec!(-0.3)),
            ],
        };

        let candidates = detect_event(&snapshot, &policy());
        let groups: Vec<&str> = candidates.iter().map(|c| c.outcome_group).collect();
        assert_eq!(groups, vec!["home_away", "home_draw_away"]);

        let three_way = &candidates[1];
        assert_eq!(three_way.state_pnls, vec![dec!(0.1), dec!(0.1), dec!(0.1)]);
        assert_eq!(three_way.total_stake, dec!(0.9));
    }

    #[test]
    fn test_cheapest_leg_wins_across_venues() {
        let snapshot = EventSnapshot {
            event_id: 1,
            outcomes: vec![
                outcome_with_quote(1, "kalshi", "home_win", dec!(0.45), dec!(0.55), dec!(-0.45)),
                outcome_with_quote(2, "polymarket", "home_win", dec!(0.4), dec!(0.6), dec!(-0.4)),
                outcome_with_quote(3, "kalshi", "away_win", dec!(0.5), dec!(0.5), dec!(-0.5)),
            ],
        };

        let candidates = detect_event(&snapshot, &policy());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].legs[0].venue_id, "polymarket");
        assert_eq!(candidates[0].legs[0].market_outcome_id, 2);
    }

    #[test]
    fn test_unrecognized_labels_are_invisible() {
        let snapshot = EventSnapshot {
            event_id: 1,
            outcomes: vec![
                outcome_with_quote(1, "kalshi", "tie", dec!(0.4), dec!(0.6), dec!(-0.4)),
                outcome_with_quote(2, "polymarket", "away_win", dec!(0.5), dec!(0.5), dec!(-0.5)),
            ],
        };
        assert!(detect_event(&snapshot, &policy()).is_empty());
    }

    // ==================== Policy Gate Tests ====================

    #[test]
    fn test_roi_floor_discards_thin_edges() {
        // Riskless but worst-case ROI well under the default 0.5% floor.
        let snapshot = EventSnapshot {
            event_id: 1,
            outcomes: vec![
                outcome_with_quote(1, "kalshi", "yes", dec!(0.499), dec!(0.501), dec!(-0.499)),
                outcome_with_quote(2, "polymarket", "no", dec!(0.5), dec!(0.5), dec!(-0.5)),
            ],
        };
        let strict = DetectionPolicy {
            min_worst_case_roi: dec!(0.005),
            min_total_stake: dec!(0.1),
            ..DetectionPolicy::default()
        };
        assert!(detect_event(&snapshot, &strict).is_empty());

        let lenient = DetectionPolicy {
            min_worst_case_roi: dec!(0.0001),
            min_total_stake: dec!(0.1),
            ..DetectionPolicy::default()
        };
        assert_eq!(detect_event(&snapshot, &lenient).len(), 1);
    }

    #[test]
    fn test_min_total_stake_discards_small_books() {
        let snapshot = EventSnapshot {
            event_id: 1,
            outcomes: vec![
                outcome_with_quote(1, "kalshi", "home_win", dec!(0.4), dec!(0.6), dec!(-0.4)),
                outcome_with_quote(2, "polymarket", "away_win", dec!(0.5), dec!(0.5), dec!(-0.5)),
            ],
        };
        // Default policy needs 10.0 total stake; this book stakes 0.9.
        assert!(detect_event(&snapshot, &DetectionPolicy::default()).is_empty());
    }
}
