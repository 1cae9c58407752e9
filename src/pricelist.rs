//! Validated unit prices.

use rust_decimal::Decimal;

use crate::asset::{Asset, AssetMap};
use crate::error::{InputKind, Result};
use crate::validate::check_entries;

/// Current unit price per asset.
///
/// Always non-empty, every key uppercase and every price strictly positive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pricelist {
    prices: AssetMap,
}

impl Pricelist {
    /// Validate and wrap a price mapping.
    pub fn new(prices: AssetMap) -> Result<Self> {
        check_entries(InputKind::Pricelist, &prices)?;
        Ok(Self { prices })
    }

    /// Price of `asset`, if listed.
    #[inline]
    pub fn price(&self, asset: &Asset) -> Option<Decimal> {
        self.prices.get(asset).copied()
    }

    #[inline]
    pub fn contains(&self, asset: &Asset) -> bool {
        self.prices.contains_key(asset)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Always false for a constructed pricelist.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Asset, &Decimal)> {
        self.prices.iter()
    }

    /// Listed assets, sorted.
    pub fn assets(&self) -> Vec<&Asset> {
        let mut assets: Vec<&Asset> = self.prices.keys().collect();
        assets.sort();
        assets
    }

    pub fn as_map(&self) -> &AssetMap {
        &self.prices
    }
}

impl std::ops::Index<&Asset> for Pricelist {
    type Output = Decimal;

    /// # Panics
    ///
    /// If `asset` is not listed.
    fn index(&self, asset: &Asset) -> &Decimal {
        &self.prices[asset]
    }
}
