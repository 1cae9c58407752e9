//! Structural checks shared by every asset mapping.

use rust_decimal::Decimal;

use crate::asset::AssetMap;
use crate::error::{Error, InputKind, Result};

/// Check a mapping's shape: non-empty, uppercase keys, positive values.
///
/// Emptiness is checked first, then each entry: identifier case before
/// positivity. Iteration order over the map is unspecified, so with several
/// bad entries any one of them may be the one reported.
pub(crate) fn check_entries(kind: InputKind, entries: &AssetMap) -> Result<()> {
    if entries.is_empty() {
        return Err(Error::EmptyInput(kind));
    }

    for (asset, &amount) in entries {
        if !asset.is_canonical() {
            return Err(Error::InvalidAsset(asset.clone()));
        }
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount {
                asset: asset.clone(),
                amount,
            });
        }
    }
    Ok(())
}
