//! Target weightings ("indexes").

use rust_decimal::Decimal;

use crate::asset::{Asset, AssetMap};
use crate::error::{Error, InputKind, Result};
use crate::pricelist::Pricelist;
use crate::validate::check_entries;

/// Desired share of total value per asset.
///
/// Every weight is in (0, 1], every asset is priced, and the weights sum to
/// exactly one (decimal equality, no tolerance).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetIndex {
    weights: AssetMap,
}

impl TargetIndex {
    /// Validate `weights` against the authoritative `prices`.
    ///
    /// Checks run in a fixed order: emptiness, per-entry case and sign,
    /// pricelist membership, then the total. A total past `Decimal::MAX`
    /// saturates and is reported as `IndexSumIncorrect(Decimal::MAX)`.
    pub fn new(weights: AssetMap, prices: &Pricelist) -> Result<Self> {
        check_entries(InputKind::Index, &weights)?;

        if let Some(asset) = weights.keys().find(|asset| !prices.contains(asset)) {
            return Err(Error::AssetMissingFromPricelist(asset.clone()));
        }

        // Weights are positive, so the total only grows and saturation
        // can never land back on one.
        let sum = weights
            .values()
            .fold(Decimal::ZERO, |sum, &weight| sum.saturating_add(weight));
        if sum != Decimal::ONE {
            return Err(Error::IndexSumIncorrect(sum));
        }

        Ok(Self { weights })
    }

    #[inline]
    pub fn weight(&self, asset: &Asset) -> Option<Decimal> {
        self.weights.get(asset).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Asset, &Decimal)> {
        self.weights.iter()
    }
}
