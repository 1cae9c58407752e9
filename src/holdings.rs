//! Validated held quantities.

use rust_decimal::Decimal;

use crate::asset::{Asset, AssetMap};
use crate::error::{Error, InputKind, Result};
use crate::pricelist::Pricelist;
use crate::validate::check_entries;

/// Quantity owned per asset.
///
/// Zero holdings are rejected: owning zero of an asset is expressed by
/// leaving it out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Holdings {
    amounts: AssetMap,
}

impl Holdings {
    /// Validate and wrap a holdings mapping.
    pub fn new(amounts: AssetMap) -> Result<Self> {
        check_entries(InputKind::Holdings, &amounts)?;
        Ok(Self { amounts })
    }

    /// Ensure every held asset has a price in `prices`.
    pub fn check_priced(&self, prices: &Pricelist) -> Result<()> {
        match self.amounts.keys().find(|asset| !prices.contains(asset)) {
            Some(asset) => Err(Error::AssetMissingFromPricelist(asset.clone())),
            None => Ok(()),
        }
    }

    /// Held quantity, or zero if the asset is not held.
    #[inline]
    pub fn amount(&self, asset: &Asset) -> Decimal {
        self.amounts.get(asset).copied().unwrap_or(Decimal::ZERO)
    }

    #[inline]
    pub fn contains(&self, asset: &Asset) -> bool {
        self.amounts.contains_key(asset)
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Asset, &Decimal)> {
        self.amounts.iter()
    }

    pub fn as_map(&self) -> &AssetMap {
        &self.amounts
    }
}
