//! Account: holdings + prices + their derived total value.

use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use crate::asset::AssetMap;
use crate::error::{Error, InputKind, Result};
use crate::holdings::Holdings;
use crate::index::TargetIndex;
use crate::pricelist::Pricelist;
use crate::rebalance::compute_trades;
use crate::source::PriceSource;
use crate::trade::Trades;
use crate::valuation;

/// An immutable snapshot of holdings valued at a pricelist.
///
/// The total value is computed once at construction. To reflect new
/// holdings or prices, build a new `Account`.
#[derive(Clone, Debug)]
pub struct Account {
    holdings: Holdings,
    prices: Arc<Pricelist>,
    value: Decimal,
}

impl Account {
    /// Validate `prices` and `holdings` and value the account.
    ///
    /// ```
    /// use nanobalance::{Account, Action, Asset, asset_map};
    /// use rust_decimal::Decimal;
    ///
    /// let account = Account::new(
    ///     asset_map([("ETH", Decimal::from(20)), ("BTC", Decimal::new(5, 1))]),
    ///     asset_map([("ETH", Decimal::from(200)), ("BTC", Decimal::from(5000))]),
    /// )
    /// .unwrap();
    /// assert_eq!(account.value(), Decimal::from(6500));
    ///
    /// let trades = account
    ///     .rebalance(asset_map([("ETH", Decimal::new(3, 1)), ("BTC", Decimal::new(7, 1))]))
    ///     .unwrap();
    /// assert_eq!(trades[&Asset::new("ETH")].action, Action::Sell);
    /// assert_eq!(trades[&Asset::new("ETH")].amount, Decimal::new(1025, 2));
    /// ```
    pub fn new(holdings: AssetMap, prices: AssetMap) -> Result<Self> {
        Self::with_pricelist(holdings, Pricelist::new(prices)?)
    }

    /// Value `holdings` against an already validated pricelist.
    ///
    /// Besides the input checks this fails with `ValueOutOfRange` when the
    /// total value exceeds `Decimal::MAX`, and with `ZeroValue` when every
    /// position rounds to zero at 28 decimal places.
    pub fn with_pricelist(holdings: AssetMap, prices: impl Into<Arc<Pricelist>>) -> Result<Self> {
        let prices = prices.into();
        let holdings = Holdings::new(holdings)?;
        holdings.check_priced(&prices)?;

        let value = valuation::total_value(&holdings, &prices)?;
        debug!(
            "account: {} holdings over {} prices, value {value}",
            holdings.len(),
            prices.len()
        );

        Ok(Self {
            holdings,
            prices,
            value,
        })
    }

    /// Value `holdings` against the current list of a shared source.
    pub fn from_source(holdings: AssetMap, source: &PriceSource) -> Result<Self> {
        let prices = source
            .get()
            .ok_or(Error::EmptyInput(InputKind::Pricelist))?;
        Self::with_pricelist(holdings, prices)
    }

    /// Total market value.
    #[inline]
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn holdings(&self) -> &Holdings {
        &self.holdings
    }

    pub fn pricelist(&self) -> &Arc<Pricelist> {
        &self.prices
    }

    /// Current value share of each held asset.
    ///
    /// A position too small to register at 28 decimal places has weight zero.
    pub fn weights(&self) -> AssetMap {
        valuation::shares(self.holdings.as_map(), &self.prices, self.value)
    }

    /// Trades that bring this account to the `target` weighting.
    ///
    /// The result holds exactly one trade per asset in `target`, including
    /// zero-amount buys for assets already on target. Holdings outside
    /// `target` are left alone.
    pub fn rebalance(&self, target: AssetMap) -> Result<Trades> {
        let index = TargetIndex::new(target, &self.prices)?;
        self.rebalance_to(&index)
    }

    /// Like [`rebalance`](Self::rebalance) for an index already validated.
    ///
    /// Returns `AssetMissingFromPricelist` if `index` names an asset this
    /// account's pricelist does not carry.
    pub fn rebalance_index(&self, index: &TargetIndex) -> Result<Trades> {
        if let Some((asset, _)) = index.iter().find(|(asset, _)| !self.prices.contains(asset)) {
            return Err(Error::AssetMissingFromPricelist(asset.clone()));
        }
        self.rebalance_to(index)
    }

    fn rebalance_to(&self, index: &TargetIndex) -> Result<Trades> {
        let trades = compute_trades(self.value, &self.holdings, &self.prices, index)?;
        debug!("rebalance: {} trades over value {}", trades.len(), self.value);
        Ok(trades)
    }
}
