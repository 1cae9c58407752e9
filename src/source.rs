//! Shared, replaceable price source.
//!
//! Stands in for a process-wide "current pricelist": callers own a
//! [`PriceSource`] and pass it to [`Account::from_source`](crate::Account::from_source)
//! explicitly. Updates swap the whole list at once, so a reader sees either
//! the old prices or the new ones, never a mix.

use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use crate::asset::AssetMap;
use crate::error::Result;
use crate::pricelist::Pricelist;

/// A configurable pricelist shared between threads.
#[derive(Debug, Default)]
pub struct PriceSource {
    current: RwLock<Option<Arc<Pricelist>>>,
}

impl PriceSource {
    /// An empty source. [`get`](Self::get) returns `None` until [`set`](Self::set).
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `prices` and make them the current list.
    ///
    /// On error the previous list stays in place.
    pub fn set(&self, prices: AssetMap) -> Result<()> {
        let list = Arc::new(Pricelist::new(prices)?);
        debug!("price source updated: {} assets", list.len());
        // A panicked writer can only have left a whole Arc behind.
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(list);
        Ok(())
    }

    /// Snapshot of the current list.
    pub fn get(&self) -> Option<Arc<Pricelist>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        debug!("price source cleared");
    }
}

impl From<Pricelist> for PriceSource {
    fn from(list: Pricelist) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(list))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Asset, asset_map};
    use crate::error::{Error, InputKind};
    use rust_decimal_macros::dec;

    #[test]
    fn starts_empty() {
        assert!(PriceSource::new().get().is_none());
    }

    #[test]
    fn set_then_get() {
        let source = PriceSource::new();
        source
            .set(asset_map([("ETH", dec!(222)), ("BTC", dec!(5555))]))
            .unwrap();
        let list = source.get().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.price(&Asset::new("BTC")), Some(dec!(5555)));
    }

    #[test]
    fn invalid_set_keeps_previous() {
        let source = PriceSource::new();
        source.set(asset_map([("ETH", dec!(200))])).unwrap();

        assert_eq!(
            source.set(AssetMap::default()),
            Err(Error::EmptyInput(InputKind::Pricelist))
        );
        assert_eq!(
            source.set(asset_map([("ETH", dec!(200)), ("btc", dec!(5000))])),
            Err(Error::InvalidAsset(Asset::new("btc")))
        );
        assert_eq!(
            source.get().unwrap().price(&Asset::new("ETH")),
            Some(dec!(200))
        );
    }

    #[test]
    fn clear_empties() {
        let source = PriceSource::new();
        source.set(asset_map([("ETH", dec!(5))])).unwrap();
        source.clear();
        assert!(source.get().is_none());
    }

    #[test]
    fn snapshot_survives_replacement() {
        let source = PriceSource::new();
        source.set(asset_map([("ETH", dec!(200))])).unwrap();
        let before = source.get().unwrap();

        source.set(asset_map([("ETH", dec!(300))])).unwrap();

        assert_eq!(before.price(&Asset::new("ETH")), Some(dec!(200)));
        assert_eq!(
            source.get().unwrap().price(&Asset::new("ETH")),
            Some(dec!(300))
        );
    }

    #[test]
    fn readers_never_see_a_mix() {
        let source = Arc::new(PriceSource::new());
        source
            .set(asset_map([("ETH", dec!(1)), ("BTC", dec!(1))]))
            .unwrap();

        let writer = {
            let source = Arc::clone(&source);
            std::thread::spawn(move || {
                for i in 1..200u32 {
                    let p = rust_decimal::Decimal::from(i);
                    source.set(asset_map([("ETH", p), ("BTC", p)])).unwrap();
                }
            })
        };

        for _ in 0..200 {
            let list = source.get().unwrap();
            assert_eq!(list.price(&Asset::new("ETH")), list.price(&Asset::new("BTC")));
        }
        writer.join().unwrap();
    }
}
