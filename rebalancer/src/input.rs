//! Holdings and pricelist files: JSON objects of asset → decimal.
//!
//! Values should be JSON strings (`{"ETH": "20.5"}`) so they are read as
//! exact decimals. A repeated asset key is a parse error; every other
//! check is left to the engine.

use std::fmt;
use std::path::Path;

use nanobalance::{Asset, AssetMap, Decimal};
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::error::{Error, Result};

/// An asset map that refuses duplicate keys instead of keeping the last.
struct UniqueAssetMap(AssetMap);

impl<'de> Deserialize<'de> for UniqueAssetMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct UniqueVisitor;

        impl<'de> Visitor<'de> for UniqueVisitor {
            type Value = UniqueAssetMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of asset to decimal amount")
            }

            fn visit_map<M: MapAccess<'de>>(
                self,
                mut access: M,
            ) -> std::result::Result<Self::Value, M::Error> {
                let mut map = AssetMap::default();
                while let Some((asset, amount)) = access.next_entry::<Asset, Decimal>()? {
                    if map.contains_key(&asset) {
                        return Err(de::Error::custom(format_args!("duplicate asset {asset}")));
                    }
                    map.insert(asset, amount);
                }
                Ok(UniqueAssetMap(map))
            }
        }

        deserializer.deserialize_map(UniqueVisitor)
    }
}

/// Load an asset map from a JSON file.
pub fn load_asset_map(path: &Path) -> Result<AssetMap> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::InputRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_asset_map(&contents)
}

/// Parse an asset map from a JSON string.
pub fn parse_asset_map(json: &str) -> Result<AssetMap> {
    let UniqueAssetMap(map) = serde_json::from_str(json)?;
    Ok(map)
}
