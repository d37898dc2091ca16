//! Riskless stake solvers.
//!
//! Two-way groups get a closed-form solve: stake leg A at 1 share, size leg
//! B so both state payoffs stay strictly positive. Three-way groups get an
//! equal-unit-stake feasibility check only; combinations that would need
//! unequal stakes are out of scope for it.

use rust_decimal::Decimal;

use crate::legs::Leg;

/// Stake sizing for a two-leg riskless combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoWaySolution {
    pub stake_a: Decimal,
    pub stake_b: Decimal,
    /// Portfolio PnL if leg A's outcome occurs.
    pub pnl_a: Decimal,
    /// Portfolio PnL if leg B's outcome occurs.
    pub pnl_b: Decimal,
}

/// Solves a two-way outcome group for a riskless stake pair.
///
/// With per-share payoffs `(win_a, lose_a)` and `(win_b, lose_b)`, stake A is
/// fixed at 1 and stake B at `(win_a - lose_a) / (win_b - lose_b)`. The two
/// state payoffs are not equalized; each only has to stay positive. Returns
/// `None` when the system is degenerate (either spread non-positive) or when
/// either state payoff fails to clear zero.
#[must_use]
pub fn solve_two_way(leg_a: &Leg, leg_b: &Leg) -> Option<TwoWaySolution> {
    let num = leg_a.win_pnl - leg_a.lose_pnl;
    let denom = leg_b.win_pnl - leg_b.lose_pnl;
    if num <= Decimal::ZERO || denom <= Decimal::ZERO {
        return None;
    }

    let ratio = num / denom;
    if ratio <= Decimal::ZERO {
        return None;
    }

    let pnl_a = leg_a.win_pnl + ratio * leg_b.lose_pnl;
    let pnl_b = leg_a.lose_pnl + ratio * leg_b.win_pnl;
    if pnl_a <= Decimal::ZERO || pnl_b <= Decimal::ZERO {
        return None;
    }

    Some(TwoWaySolution {
        stake_a: Decimal::ONE,
        stake_b: ratio,
        pnl_a,
        pnl_b,
    })
}

/// Equal-unit-stake outcome for a three-way group.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreeWaySolution {
    pub stakes: [Decimal; 3],
    /// Portfolio PnL per winning outcome, in leg order.
    pub pnls: [Decimal; 3],
}

/// Tests whether backing all three legs with one share each is riskless.
///
/// For each possible winning outcome the portfolio collects that leg's win
/// PnL and the other two legs' lose PnL. Accepts when no state loses money
/// and at least one makes some.
#[must_use]
pub fn check_equal_stakes_three_way(legs: &[Leg; 3]) -> Option<ThreeWaySolution> {
    let stakes = [Decimal::ONE; 3];
    let mut pnls = [Decimal::ZERO; 3];
    for (i, pnl) in pnls.iter_mut().enumerate() {
        for (j, leg) in legs.iter().enumerate() {
            let per_share = if i == j { leg.win_pnl } else { leg.lose_pnl };
            *pnl += stakes[j] * per_share;
        }
    }

    let worst = pnls.iter().copied().min()?;
    let best = pnls.iter().copied().max()?;
    if worst >= Decimal::ZERO && best > Decimal::ZERO {
        Some(ThreeWaySolution { stakes, pnls })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sportsarb_core::outcome::OutcomeLabel;

    use crate::legs::effective_cost;

    fn leg(label: OutcomeLabel, price: Decimal, win: Decimal, lose: Decimal) -> Leg {
        Leg {
            venue_id: "test".to_string(),
            market_outcome_id: 0,
            outcome_label: label,
            share_price: price,
            win_pnl: win,
            lose_pnl: lose,
            quote_id: None,
            effective_cost: effective_cost(price, lose),
        }
    }

    // ==================== Two-Way Tests ====================

    #[test]
    fn test_two_way_accepts_symmetric_underround() {
        let a = leg(OutcomeLabel::HomeWin, dec!(0.4), dec!(0.6), dec!(-0.4));
        let b = leg(OutcomeLabel::AwayWin, dec!(0.5), dec!(0.5), dec!(-0.5));

        let solution = solve_two_way(&a, &b).unwrap();
        // num = 1.0, denom = 1.0, so both legs stake one share.
        assert_eq!(solution.stake_a, dec!(1));
        assert_eq!(solution.stake_b, dec!(1));
        assert_eq!(solution.pnl_a, dec!(0.1));
        assert_eq!(solution.pnl_b, dec!(0.1));
    }

    #[test]
    fn test_two_way_sizes_unequal_spreads() {
        let a = leg(OutcomeLabel::Yes, dec!(0.3), dec!(0.7), dec!(-0.3));
        // Profit commission narrows leg B's spread to 0.8.
        let b = leg(OutcomeLabel::No, dec!(0.25), dec!(0.55), dec!(-0.25));

        let solution = solve_two_way(&a, &b).unwrap();
        // ratio = (0.7 + 0.3) / (0.55 + 0.25) = 1.25
        assert_eq!(solution.stake_a, dec!(1));
        assert_eq!(solution.stake_b, dec!(1.25));
        assert_eq!(solution.pnl_a, dec!(0.3875));
        assert_eq!(solution.pnl_b, dec!(0.3875));
    }

    #[test]
    fn test_two_way_rejects_degenerate_spread() {
        // Win payoff below lose payoff on leg A's own axis.
        let a = leg(OutcomeLabel::HomeWin, dec!(0.9), dec!(-0.2), dec!(0.1));
        let b = leg(OutcomeLabel::AwayWin, dec!(0.5), dec!(0.5), dec!(-0.5));
        assert!(solve_two_way(&a, &b).is_none());
        assert!(solve_two_way(&b, &a).is_none());
    }

    #[test]
    fn test_two_way_rejects_overround_prices() {
        // Both sides priced rich: riskless combination impossible.
        let a = leg(OutcomeLabel::HomeWin, dec!(0.55), dec!(0.45), dec!(-0.55));
        let b = leg(OutcomeLabel::AwayWin, dec!(0.55), dec!(0.45), dec!(-0.55));
        assert!(solve_two_way(&a, &b).is_none());
    }

    // ==================== Three-Way Tests ====================

    #[test]
    fn test_three_way_accepts_all_states_nonnegative() {
        // Per-state PnLs work out to [2, 3, 1].
        let legs = [
            leg(OutcomeLabel::HomeWin, dec!(0.1), dec!(2), dec!(0)),
            leg(OutcomeLabel::Draw, dec!(0.1), dec!(3), dec!(0)),
            leg(OutcomeLabel::AwayWin, dec!(0.1), dec!(1), dec!(0)),
        ];
        let solution = check_equal_stakes_three_way(&legs).unwrap();
        assert_eq!(solution.stakes, [dec!(1), dec!(1), dec!(1)]);
        assert_eq!(solution.pnls, [dec!(2), dec!(3), dec!(1)]);
    }

    #[test]
    fn test_three_way_rejects_losing_state() {
        // Per-state PnLs work out to [-1, 3, 1].
        let legs = [
            leg(OutcomeLabel::HomeWin, dec!(0.1), dec!(-1), dec!(0)),
            leg(OutcomeLabel::Draw, dec!(0.1), dec!(3), dec!(0)),
            leg(OutcomeLabel::AwayWin, dec!(0.1), dec!(1), dec!(0)),
        ];
        assert!(check_equal_stakes_three_way(&legs).is_none());
    }

    #[test]
    fn test_three_way_rejects_all_zero_states() {
        // Fair three-way book: no state gains, nothing to record.
        let legs = [
            leg(OutcomeLabel::HomeWin, dec!(0.5), dec!(0.5), dec!(-0.25)),
            leg(OutcomeLabel::Draw, dec!(0.5), dec!(0.5), dec!(-0.25)),
            leg(OutcomeLabel::AwayWin, dec!(0.5), dec!(0.5), dec!(-0.25)),
        ];
        assert!(check_equal_stakes_three_way(&legs).is_none());
    }

    #[test]
    fn test_three_way_underround_cross_venue_prices() {
        // Home 0.30, draw 0.25, away 0.30 across venues, no fees: every
        // state pays 1 - 0.85 = 0.15 on a unit stake per leg.
        let legs = [
            leg(OutcomeLabel::HomeWin, dec!(0.30), dec!(0.70), dec!(-0.30)),
            leg(OutcomeLabel::Draw, dec!(0.25), dec!(0.75), dec!(-0.25)),
            leg(OutcomeLabel::AwayWin, dec!(0.30), dec!(0.70), dec!(-0.30)),
        ];
        let solution = check_equal_stakes_three_way(&legs).unwrap();
        assert_eq!(solution.pnls, [dec!(0.15), dec!(0.15), dec!(0.15)]);
    }
}
