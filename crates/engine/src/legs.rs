//! Leg selection.
//!
//! A leg is one venue/outcome position. For each canonical label the
//! detector keeps at most one leg: the one with the lowest effective cost
//! among all outcomes carrying that label across the event's markets.

use rust_decimal::Decimal;

use sportsarb_core::outcome::OutcomeLabel;
use sportsarb_data::models::Quote;

/// One outcome of the event snapshot: its venue, canonical label (when the
/// stored label is in the vocabulary), and latest quote (when one exists).
#[derive(Debug, Clone)]
pub struct OutcomeQuote {
    pub market_outcome_id: i32,
    pub venue_id: String,
    pub label: Option<OutcomeLabel>,
    pub quote: Option<Quote>,
}

/// One venue/outcome position candidate for an arbitrage combination.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub venue_id: String,
    pub market_outcome_id: i32,
    pub outcome_label: OutcomeLabel,
    pub share_price: Decimal,
    pub win_pnl: Decimal,
    pub lose_pnl: Decimal,
    pub quote_id: Option<i32>,
    pub effective_cost: Decimal,
}

impl Leg {
    /// Builds a leg from an outcome's latest quote, or `None` when any
    /// derived pricing field is missing (the quote is ineligible).
    #[must_use]
    pub fn from_quote(
        venue_id: &str,
        market_outcome_id: i32,
        outcome_label: OutcomeLabel,
        quote: &Quote,
    ) -> Option<Self> {
        let share_price = quote.share_price?;
        let win_pnl = quote.net_pnl_if_win_per_share?;
        let lose_pnl = quote.net_pnl_if_lose_per_share?;
        Some(Self {
            venue_id: venue_id.to_string(),
            market_outcome_id,
            outcome_label,
            share_price,
            win_pnl,
            lose_pnl,
            quote_id: Some(quote.id),
            effective_cost: effective_cost(share_price, lose_pnl),
        })
    }
}

/// Worst-case cash outlay proxy per share: the larger of the share price and
/// the loss exposure. Used both to rank competing legs and to size stakes.
#[must_use]
pub fn effective_cost(share_price: Decimal, lose_pnl: Decimal) -> Decimal {
    share_price.max(lose_pnl.abs())
}

/// Selects the cheapest eligible leg carrying `label`, or `None` when no
/// outcome with that label has a fully materialized quote.
#[must_use]
pub fn select_best_leg(outcomes: &[OutcomeQuote], label: OutcomeLabel) -> Option<Leg> {
    let mut best: Option<Leg> = None;
    for oq in outcomes {
        if oq.label != Some(label) {
            continue;
        }
        let Some(quote) = &oq.quote else { continue };
        let Some(leg) = Leg::from_quote(&oq.venue_id, oq.market_outcome_id, label, quote) else {
            continue;
        };
        match &best {
            Some(current) if leg.effective_cost >= current.effective_cost => {}
            _ => best = Some(leg),
        }
    }
    best
}
