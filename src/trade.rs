//! Trades produced by a rebalance, and their projected effect on holdings.

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::asset::{Asset, AssetMap};
use crate::holdings::Holdings;

/// Direction of a trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Action {
    Buy,
    Sell,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
        }
    }
}

/// A buy or sell of a non-negative amount of one asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trade {
    pub action: Action,
    pub amount: Decimal,
}

impl Trade {
    pub fn buy(amount: Decimal) -> Self {
        Self {
            action: Action::Buy,
            amount,
        }
    }

    pub fn sell(amount: Decimal) -> Self {
        Self {
            action: Action::Sell,
            amount,
        }
    }

    /// Trade for a signed quantity change.
    ///
    /// Only a negative delta sells; a zero delta is a buy of zero.
    pub fn from_delta(delta: Decimal) -> Self {
        if delta < Decimal::ZERO {
            Self::sell(delta.abs())
        } else {
            // abs() clears the sign bit of a negative zero
            Self::buy(delta.abs())
        }
    }

    /// Quantity change this trade applies: positive for buys.
    pub fn signed_amount(&self) -> Decimal {
        match self.action {
            Action::Buy => self.amount,
            Action::Sell => -self.amount,
        }
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.amount)
    }
}

/// One trade per asset of the target index.
pub type Trades = FxHashMap<Asset, Trade>;

/// Quantities held after applying `trades` to `holdings`.
///
/// Buys add, sells subtract. Holdings without a trade are carried over
/// untouched; assets that end at zero stay in the map with a zero quantity.
pub fn project_holdings(holdings: &Holdings, trades: &Trades) -> AssetMap {
    let mut after = holdings.as_map().clone();
    for (asset, trade) in trades {
        *after.entry(asset.clone()).or_insert(Decimal::ZERO) += trade.signed_amount();
    }
    after
}

/// Trades sorted by asset, for display and logging.
pub fn sorted(trades: &Trades) -> Vec<(&Asset, &Trade)> {
    let mut out: Vec<_> = trades.iter().collect();
    out.sort_by(|a, b| a.0.cmp(b.0));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::asset_map;
    use rust_decimal_macros::dec;

    #[test]
    fn negative_delta_sells() {
        assert_eq!(Trade::from_delta(dec!(-33.6)), Trade::sell(dec!(33.6)));
    }

    #[test]
    fn positive_delta_buys() {
        assert_eq!(Trade::from_delta(dec!(0.84)), Trade::buy(dec!(0.84)));
    }

    #[test]
    fn zero_delta_is_buy_of_zero() {
        let t = Trade::from_delta(dec!(0));
        assert_eq!(t.action, Action::Buy);
        assert!(t.is_noop());
        // rust_decimal can carry a negative zero
        let t = Trade::from_delta(-dec!(0.00));
        assert_eq!(t.action, Action::Buy);
    }

    #[test]
    fn signed_amount() {
        assert_eq!(Trade::buy(dec!(2)).signed_amount(), dec!(2));
        assert_eq!(Trade::sell(dec!(2)).signed_amount(), dec!(-2));
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Action::Buy), "BUY");
        assert_eq!(format!("{}", Trade::sell(dec!(10.25))), "SELL 10.25");
    }

    #[test]
    fn projection_applies_trades() {
        let holdings = Holdings::new(asset_map([("ETH", dec!(42)), ("XLM", dec!(5))])).unwrap();
        let trades: Trades = [
            (Asset::new("ETH"), Trade::sell(dec!(33.6))),
            (Asset::new("BTC"), Trade::buy(dec!(0.84))),
        ]
        .into_iter()
        .collect();

        let after = project_holdings(&holdings, &trades);
        assert_eq!(after[&Asset::new("ETH")], dec!(8.4));
        assert_eq!(after[&Asset::new("BTC")], dec!(0.84));
        // untouched
        assert_eq!(after[&Asset::new("XLM")], dec!(5));
    }

    #[test]
    fn sorted_by_asset() {
        let trades: Trades = [
            (Asset::new("XLM"), Trade::buy(dec!(1))),
            (Asset::new("BAT"), Trade::buy(dec!(1))),
            (Asset::new("ETH"), Trade::sell(dec!(1))),
        ]
        .into_iter()
        .collect();
        let ids: Vec<&str> = sorted(&trades).iter().map(|(a, _)| a.as_str()).collect();
        assert_eq!(ids, ["BAT", "ETH", "XLM"]);
    }
}
