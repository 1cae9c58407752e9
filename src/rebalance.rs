//! Rebalancing engine: target value → target quantity → trade.
//!
//! For each asset `A` with weight `w` in the target index:
//!
//! ```text
//! target_qty = total_value × w ÷ price[A]
//! delta      = target_qty − held[A]        (held[A] = 0 when not held)
//! trade      = SELL |delta| if delta < 0, else BUY delta
//! ```
//!
//! All arithmetic is `rust_decimal` arithmetic, exact within the type's
//! range: at most 28 decimal places and a magnitude below about 7.9 × 10^28.
//! Two steps can round:
//!
//! - division: a quotient that does not terminate within 28 significant
//!   digits is rounded to fit (`0.5 ÷ 3` yields
//!   `0.1666666666666666666666666667`). Terminating quotients are exact.
//! - multiplication: a product needing more than 28 decimal places is
//!   rounded to 28 (`1e-16 × 1e-16` is zero). Valuation rejects an account
//!   whose every position rounds away.
//!
//! A target quantity that exceeds the range (a large value over a tiny
//! price) fails with `ValueOutOfRange` instead of wrapping or panicking.
//!
//! Assets held but absent from the index get no trade and stay as they are.

use log::trace;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::holdings::Holdings;
use crate::index::TargetIndex;
use crate::pricelist::Pricelist;
use crate::trade::{Trade, Trades};

/// Compute one trade per asset in `index`.
///
/// `index` must have been validated against `prices`; an unpriced index
/// asset panics.
pub(crate) fn compute_trades(
    total_value: Decimal,
    holdings: &Holdings,
    prices: &Pricelist,
    index: &TargetIndex,
) -> Result<Trades> {
    let mut trades = Trades::with_capacity_and_hasher(index.len(), Default::default());

    for (asset, &weight) in index.iter() {
        let target_qty = total_value
            .checked_mul(weight)
            .and_then(|target_value| target_value.checked_div(prices[asset]))
            .ok_or_else(|| Error::ValueOutOfRange(asset.clone()))?;
        let delta = target_qty - holdings.amount(asset);
        let trade = Trade::from_delta(delta);
        trace!("{asset}: target {target_qty}, delta {delta} -> {trade}");
        trades.insert(asset.clone(), trade);
    }

    Ok(trades)
}
