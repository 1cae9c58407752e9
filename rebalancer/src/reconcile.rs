//! Drift report: compare the current weighting against a target.

use nanobalance::{Account, Asset, TargetIndex};
use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;

/// Reconciliation report comparing actual vs target weights.
#[derive(Debug, Clone, Serialize)]
pub struct DriftReport {
    pub entries: Vec<DriftEntry>,
    pub tracking_error: Decimal,
    pub decimals: u32,
}

/// One asset's drift entry.
#[derive(Debug, Clone, Serialize)]
pub struct DriftEntry {
    pub asset: Asset,
    pub target_weight: Decimal,
    pub actual_weight: Decimal,
    pub diff_weight: Decimal,
    pub held: Decimal,
}

/// Compare the account's current weighting against a validated `target`.
///
/// Covers every asset that is held or targeted; held assets outside the
/// target count with a target weight of zero. Tracking error is the root
/// mean square of the weight differences.
pub fn drift(account: &Account, target: &TargetIndex, decimals: u32) -> DriftReport {
    let actual = account.weights();

    let mut all_assets: Vec<&Asset> = target
        .iter()
        .map(|(asset, _)| asset)
        .chain(actual.keys())
        .collect();
    all_assets.sort();
    all_assets.dedup();

    let mut entries = Vec::with_capacity(all_assets.len());
    let mut sum_sq_diff = Decimal::ZERO;

    for asset in all_assets {
        let target_weight = target.weight(asset).unwrap_or(Decimal::ZERO);
        let actual_weight = actual.get(asset).copied().unwrap_or(Decimal::ZERO);
        let diff_weight = actual_weight - target_weight;
        sum_sq_diff += diff_weight * diff_weight;

        entries.push(DriftEntry {
            asset: asset.clone(),
            target_weight,
            actual_weight,
            diff_weight,
            held: account.holdings().amount(asset),
        });
    }

    let mean_sq = sum_sq_diff / Decimal::from(entries.len().max(1) as u64);
    let tracking_error = mean_sq.sqrt().unwrap_or(Decimal::ZERO);

    DriftReport {
        entries,
        tracking_error,
        decimals,
    }
}

fn pct(weight: Decimal, dp: u32) -> Decimal {
    (weight * Decimal::ONE_HUNDRED).round_dp(dp)
}

impl std::fmt::Display for DriftReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "DRIFT:")?;
        writeln!(
            f,
            "  {:8} {:>10} {:>10} {:>10} {:>16}",
            "Asset", "Target%", "Actual%", "Diff%", "Held"
        )?;
        for e in &self.entries {
            writeln!(
                f,
                "  {:8} {:>9}% {:>9}% {:>9}% {:>16}",
                e.asset.as_str(),
                pct(e.target_weight, 2),
                pct(e.actual_weight, 2),
                pct(e.diff_weight, 2),
                e.held.round_dp(self.decimals).normalize(),
            )?;
        }
        writeln!(f, "\n  Tracking error: {}%", pct(self.tracking_error, 3))?;
        Ok(())
    }
}
