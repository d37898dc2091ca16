//! Per-share payoff math for long positions.
//!
//! A long position buys a share that pays 1 unit if the backed outcome
//! occurs. Given the share price and the venue's fee schedule, the functions
//! here compute the net PnL per share in both settlement states. The
//! arbitrage detector combines these per-leg payoffs across venues.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fees::FeeModel;

/// Net PnL per share of a long position in each settlement state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Payoff {
    /// Net profit per share if the backed outcome occurs.
    pub win_pnl: Decimal,
    /// Net profit per share if it does not (normally negative).
    pub lose_pnl: Decimal,
}

/// Computes the per-share payoff of a long position at `share_price` under a
/// venue fee model.
///
/// Pure function: identical inputs always produce identical payoffs. Fee
/// kinds never combine; `None` and [`FeeModel::Unknown`] are both fee-free.
#[must_use]
pub fn compute_payoff_long(share_price: Decimal, fee_model: Option<&FeeModel>) -> Payoff {
    let p = share_price;
    match fee_model {
        Some(FeeModel::ProfitCommission { commission_rate }) => Payoff {
            win_pnl: (Decimal::ONE - p) * (Decimal::ONE - commission_rate),
            lose_pnl: -p,
        },
        Some(FeeModel::TurnoverFee { turnover_rate }) => {
            let effective_cost = p * (Decimal::ONE + turnover_rate);
            Payoff {
                win_pnl: Decimal::ONE - effective_cost,
                lose_pnl: -effective_cost,
            }
        }
        Some(FeeModel::PerContract {
            trading_fee,
            settlement_fee,
            fee_cap: _,
        }) => {
            let effective_cost = p + trading_fee;
            Payoff {
                win_pnl: Decimal::ONE - effective_cost - settlement_fee,
                lose_pnl: -effective_cost,
            }
        }
        Some(FeeModel::Unknown) | None => Payoff {
            win_pnl: Decimal::ONE - p,
            lose_pnl: -p,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // ==================== Fee-Free Tests ====================

    #[test]
    fn test_no_fee_model() {
        let payoff = compute_payoff_long(dec!(0.4), None);
        assert_eq!(payoff.win_pnl, dec!(0.6));
        assert_eq!(payoff.lose_pnl, dec!(-0.4));
    }

    #[test]
    fn test_unknown_fee_model_is_fee_free() {
        let with_unknown = compute_payoff_long(dec!(0.4), Some(&FeeModel::Unknown));
        let without = compute_payoff_long(dec!(0.4), None);
        assert_eq!(with_unknown, without);
    }

    // ==================== Fee Model Tests ====================

    #[test]
    fn test_profit_commission() {
        let model = FeeModel::ProfitCommission {
            commission_rate: dec!(0.02),
        };
        let payoff = compute_payoff_long(dec!(0.5), Some(&model));
        // Commission only touches the winning side.
        assert_eq!(payoff.win_pnl, dec!(0.49));
        assert_eq!(payoff.lose_pnl, dec!(-0.5));
    }

    #[test]
    fn test_turnover_fee() {
        let model = FeeModel::TurnoverFee {
            turnover_rate: dec!(0.01),
        };
        let payoff = compute_payoff_long(dec!(0.5), Some(&model));
        // Effective cost 0.505 is paid in both states.
        assert_eq!(payoff.win_pnl, dec!(0.495));
        assert_eq!(payoff.lose_pnl, dec!(-0.505));
    }

    #[test]
    fn test_per_contract() {
        let model = FeeModel::PerContract {
            trading_fee: dec!(0.02),
            settlement_fee: dec!(0.01),
            fee_cap: None,
        };
        let payoff = compute_payoff_long(dec!(0.5), Some(&model));
        // win = 1 - 0.52 - 0.01, lose = -0.52
        assert_eq!(payoff.win_pnl, dec!(0.47));
        assert_eq!(payoff.lose_pnl, dec!(-0.52));
    }

    #[test]
    fn test_per_contract_fee_cap_not_applied() {
        let capped = FeeModel::PerContract {
            trading_fee: dec!(0.02),
            settlement_fee: dec!(0.01),
            fee_cap: Some(dec!(0.001)),
        };
        let uncapped = FeeModel::PerContract {
            trading_fee: dec!(0.02),
            settlement_fee: dec!(0.01),
            fee_cap: None,
        };
        assert_eq!(
            compute_payoff_long(dec!(0.5), Some(&capped)),
            compute_payoff_long(dec!(0.5), Some(&uncapped))
        );
    }

    // ==================== Purity Tests ====================

    #[test]
    fn test_payoff_is_pure() {
        let model = FeeModel::TurnoverFee {
            turnover_rate: dec!(0.015),
        };
        let first = compute_payoff_long(dec!(0.37), Some(&model));
        let second = compute_payoff_long(dec!(0.37), Some(&model));
        assert_eq!(first, second);
    }
}
