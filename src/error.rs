//! Validation errors for pricelists, holdings and target indexes.

use std::fmt;

use rust_decimal::Decimal;

use crate::asset::Asset;

/// Which caller-supplied mapping an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InputKind {
    Pricelist,
    Holdings,
    Index,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Pricelist => write!(f, "pricelist"),
            InputKind::Holdings => write!(f, "holdings"),
            InputKind::Index => write!(f, "index"),
        }
    }
}

/// Rejections of malformed input. None of these are transient: the same
/// input always yields the same error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0} must not be empty")]
    EmptyInput(InputKind),

    #[error("assets must be uppercase, got {0}")]
    InvalidAsset(Asset),

    #[error("{asset} needs positive amount, not {amount}")]
    InvalidAmount { asset: Asset, amount: Decimal },

    #[error("asset missing from pricelist: {0}")]
    AssetMissingFromPricelist(Asset),

    #[error("index values must sum to 1, got {0}")]
    IndexSumIncorrect(Decimal),

    /// A position value, running total or target quantity for this asset
    /// does not fit in a `Decimal` (about ±7.9 × 10^28).
    #[error("value for {0} is outside the decimal range")]
    ValueOutOfRange(Asset),

    /// Every position value rounded away to zero at 28 decimal places, so
    /// no weighting can be derived.
    #[error("holdings are worth zero at these prices")]
    ZeroValue,
}

pub type Result<T> = std::result::Result<T, Error>;
