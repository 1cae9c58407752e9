//! Asset identifiers and the raw asset → decimal mapping.

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

/// Identifier of a tradeable instrument, e.g. `"ETH"`.
///
/// Identifiers are compared by exact string equality. They are never
/// case-normalized: a lowercase identifier is rejected wherever it is
/// validated (see [`Asset::is_canonical`]).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Asset(String);

impl Asset {
    /// Wrap a string as an asset identifier. No validation happens here.
    pub fn new(id: impl Into<String>) -> Self {
        Asset(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the identifier equals its own uppercase form.
    pub fn is_canonical(&self) -> bool {
        self.0 == self.0.to_uppercase()
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Asset {
    fn from(id: &str) -> Self {
        Asset::new(id)
    }
}

impl From<String> for Asset {
    fn from(id: String) -> Self {
        Asset(id)
    }
}

/// Raw caller-supplied mapping of asset to a decimal value: a price,
/// a held quantity or a target weight depending on context.
pub type AssetMap = FxHashMap<Asset, Decimal>;

/// Build an [`AssetMap`] from `(id, value)` pairs.
///
/// Later duplicates overwrite earlier ones.
pub fn asset_map<I, A>(entries: I) -> AssetMap
where
    I: IntoIterator<Item = (A, Decimal)>,
    A: Into<Asset>,
{
    entries.into_iter().map(|(a, v)| (a.into(), v)).collect()
}
