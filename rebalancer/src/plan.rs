//! Rebalance plan: the engine's trades plus the portfolio they would produce.

use nanobalance::{Account, Action, Asset, Trade, Trades, project_holdings, valuation};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Result;

/// A single planned trade with its projected outcome.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    pub asset: Asset,
    pub trade: Trade,
    pub price: Decimal,
    pub notional: Decimal,
    pub held_before: Decimal,
    pub held_after: Decimal,
    pub weight_after: Decimal,
}

/// All planned trades, sorted by asset.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub total_value: Decimal,
    pub entries: Vec<PlanEntry>,
    /// Held assets the target does not mention; they are left as is.
    pub untouched: Vec<Asset>,
    pub decimals: u32,
}

impl Plan {
    /// Build a plan from the trades an account's rebalance returned.
    ///
    /// Fails when a notional or the projected portfolio value leaves the
    /// decimal range, which only happens for accounts valued near
    /// `Decimal::MAX`.
    pub fn new(account: &Account, trades: &Trades, decimals: u32) -> Result<Self> {
        let prices = account.pricelist();
        let after = project_holdings(account.holdings(), trades);
        let weights_after = valuation::weights(&after, prices)?;

        let mut entries = trades
            .iter()
            .map(|(asset, trade)| -> Result<PlanEntry> {
                let price = prices[asset];
                let notional = trade
                    .amount
                    .checked_mul(price)
                    .ok_or_else(|| nanobalance::Error::ValueOutOfRange(asset.clone()))?;
                Ok(PlanEntry {
                    asset: asset.clone(),
                    trade: *trade,
                    price,
                    notional,
                    held_before: account.holdings().amount(asset),
                    held_after: after.get(asset).copied().unwrap_or(Decimal::ZERO),
                    weight_after: weights_after.get(asset).copied().unwrap_or(Decimal::ZERO),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        entries.sort_by(|a, b| a.asset.cmp(&b.asset));

        let mut untouched: Vec<Asset> = account
            .holdings()
            .iter()
            .map(|(asset, _)| asset)
            .filter(|asset| !trades.contains_key(*asset))
            .cloned()
            .collect();
        untouched.sort();

        Ok(Self {
            total_value: account.value(),
            entries,
            untouched,
            decimals,
        })
    }

    /// True when every trade is a zero-amount buy.
    pub fn is_noop(&self) -> bool {
        self.entries.iter().all(|e| e.trade.is_noop())
    }

    /// Gross traded value on each side, saturating at `Decimal::MAX`.
    pub fn turnover(&self) -> (Decimal, Decimal) {
        self.entries
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(buy, sell), e| {
                match e.trade.action {
                    Action::Buy => (buy.saturating_add(e.notional), sell),
                    Action::Sell => (buy, sell.saturating_add(e.notional)),
                }
            })
    }

    fn fmt_amount(&self, value: Decimal) -> Decimal {
        value.round_dp(self.decimals).normalize()
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "REBALANCE TRADES (total value {}):", self.fmt_amount(self.total_value))?;
        writeln!(
            f,
            "  {:>3}  {:6} {:8} {:>18} {:>14} {:>16} {:>18} {:>9}",
            "#", "Action", "Asset", "Amount", "Price", "Notional", "Held after", "Weight"
        )?;
        for (i, e) in self.entries.iter().enumerate() {
            writeln!(
                f,
                "  {:>3}  {:6} {:8} {:>18} {:>14} {:>16} {:>18} {:>8}%",
                i + 1,
                e.trade.action.to_string(),
                e.asset.as_str(),
                self.fmt_amount(e.trade.amount),
                self.fmt_amount(e.price),
                self.fmt_amount(e.notional),
                self.fmt_amount(e.held_after),
                (e.weight_after * Decimal::ONE_HUNDRED).round_dp(2),
            )?;
        }
        if !self.untouched.is_empty() {
            let ids: Vec<&str> = self.untouched.iter().map(Asset::as_str).collect();
            writeln!(f, "\n  Not in target (left unchanged): {}", ids.join(", "))?;
        }
        let (buy, sell) = self.turnover();
        writeln!(
            f,
            "\n  Turnover: {} bought, {} sold",
            self.fmt_amount(buy),
            self.fmt_amount(sell)
        )?;
        Ok(())
    }
}
