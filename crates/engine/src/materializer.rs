//! Quote materialization.
//!
//! Fills a quote's derived pricing fields from its raw price, format tag,
//! and the venue fee model. The five derived fields are a pure function of
//! those inputs and are always written together; a quote missing its raw
//! price or format is left untouched (and therefore never selectable as an
//! arbitrage leg).

use rust_decimal::Decimal;

use sportsarb_core::error::OddsError;
use sportsarb_core::fees::FeeModel;
use sportsarb_core::odds::{normalize, PriceFormat};
use sportsarb_core::payoffs::compute_payoff_long;
use sportsarb_data::models::Quote;

/// Populates `share_price`, `decimal_odds`, `implied_prob_raw` and both
/// per-share PnL fields on the quote. The caller persists the mutation.
///
/// # Errors
/// Returns [`OddsError::UnsupportedFormat`] for an unrecognized format tag
/// and [`OddsError::InvalidInput`] for malformed odds values.
pub fn materialize_quote(quote: &mut Quote, fee_model: Option<&FeeModel>) -> Result<(), OddsError> {
    let (Some(raw_price), Some(format_tag)) = (quote.raw_price, quote.price_format.as_deref())
    else {
        return Ok(());
    };

    let format = PriceFormat::parse(format_tag)?;
    let share_price = normalize(raw_price, format)?;
    let payoff = compute_payoff_long(share_price, fee_model);

    quote.share_price = Some(share_price);
    quote.decimal_odds = if share_price > Decimal::ZERO {
        Some(Decimal::ONE / share_price)
    } else {
        None
    };
    quote.implied_prob_raw = Some(share_price);
    quote.net_pnl_if_win_per_share = Some(payoff.win_pnl);
    quote.net_pnl_if_lose_per_share = Some(payoff.lose_pnl);
    Ok(())
}
