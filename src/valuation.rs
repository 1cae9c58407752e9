//! Portfolio market value and value weighting.

use rust_decimal::Decimal;

use crate::asset::{Asset, AssetMap};
use crate::error::{Error, Result};
use crate::holdings::Holdings;
use crate::pricelist::Pricelist;

/// Total market value: Σ quantity × price over every held asset.
///
/// Products round to 28 decimal places like any `Decimal` product, so a
/// tiny position can be worth exactly zero. Fails with `ValueOutOfRange`
/// when a product or the running total exceeds `Decimal::MAX`, and with
/// `ZeroValue` when every position rounds away.
///
/// # Panics
///
/// If a held asset has no price. [`Account`](crate::Account) checks this
/// before valuing, so it only fires on a broken caller invariant.
pub fn total_value(holdings: &Holdings, prices: &Pricelist) -> Result<Decimal> {
    let value = map_value(holdings.as_map(), prices)?;
    if value.is_zero() {
        return Err(Error::ZeroValue);
    }
    Ok(value)
}

/// Value share of each asset in `quantities`.
///
/// Zero quantities are kept (with weight zero). Returns an empty map when
/// the total is zero.
///
/// # Panics
///
/// If an asset in `quantities` has no price.
pub fn weights(quantities: &AssetMap, prices: &Pricelist) -> Result<AssetMap> {
    let total = map_value(quantities, prices)?;
    if total.is_zero() {
        return Ok(AssetMap::default());
    }
    quantities
        .iter()
        .map(|(asset, &qty)| -> Result<(Asset, Decimal)> {
            Ok((asset.clone(), position_value(asset, qty, prices)? / total))
        })
        .collect()
}

/// Shares against a total already known to be non-zero and in range.
pub(crate) fn shares(quantities: &AssetMap, prices: &Pricelist, total: Decimal) -> AssetMap {
    quantities
        .iter()
        .map(|(asset, &qty)| (asset.clone(), qty * prices[asset] / total))
        .collect()
}

/// Value of an arbitrary (possibly unvalidated) quantity map.
pub(crate) fn map_value(quantities: &AssetMap, prices: &Pricelist) -> Result<Decimal> {
    quantities
        .iter()
        .try_fold(Decimal::ZERO, |total, (asset, &qty)| {
            position_value(asset, qty, prices)?
                .checked_add(total)
                .ok_or_else(|| Error::ValueOutOfRange(asset.clone()))
        })
}

fn position_value(asset: &Asset, qty: Decimal, prices: &Pricelist) -> Result<Decimal> {
    qty.checked_mul(prices[asset])
        .ok_or_else(|| Error::ValueOutOfRange(asset.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Asset, asset_map};
    use rust_decimal_macros::dec;

    fn prices() -> Pricelist {
        Pricelist::new(asset_map([("ETH", dec!(200)), ("BTC", dec!(5000))])).unwrap()
    }

    #[test]
    fn total_value_sums_positions() {
        let holdings = Holdings::new(asset_map([("ETH", dec!(20)), ("BTC", dec!(0.5))])).unwrap();
        assert_eq!(total_value(&holdings, &prices()), Ok(dec!(6500)));
    }

    #[test]
    fn unlisted_prices_ignored() {
        let holdings = Holdings::new(asset_map([("ETH", dec!(42))])).unwrap();
        assert_eq!(total_value(&holdings, &prices()), Ok(dec!(8400)));
    }

    #[test]
    #[should_panic]
    fn unpriced_holding_panics() {
        let holdings = Holdings::new(asset_map([("XLM", dec!(1))])).unwrap();
        let _ = total_value(&holdings, &prices());
    }

    #[test]
    fn weights_are_value_shares() {
        let w = weights(&asset_map([("ETH", dec!(20)), ("BTC", dec!(0.5))]), &prices()).unwrap();
        // 4000 / 6500 and 2500 / 6500
        assert_eq!(w[&Asset::new("BTC")], dec!(2500) / dec!(6500));
        assert_eq!(w.values().copied().sum::<Decimal>().round_dp(20), dec!(1));
    }

    #[test]
    fn weights_of_empty_value() {
        let w = weights(&asset_map([("ETH", dec!(0))]), &prices()).unwrap();
        assert!(w.is_empty());
    }

    #[test]
    fn product_past_max_is_an_error() {
        let prices = Pricelist::new(asset_map([("ETH", Decimal::from(10_000_000_000i64))])).unwrap();
        let holdings =
            Holdings::new(asset_map([("ETH", Decimal::from_i128_with_scale(10i128.pow(20), 0))]))
                .unwrap();
        assert_eq!(
            total_value(&holdings, &prices),
            Err(Error::ValueOutOfRange(Asset::new("ETH")))
        );
    }

    #[test]
    fn total_past_max_is_an_error() {
        let prices = Pricelist::new(asset_map([("ETH", dec!(1)), ("BTC", dec!(1))])).unwrap();
        let holdings =
            Holdings::new(asset_map([("ETH", Decimal::MAX), ("BTC", Decimal::MAX)])).unwrap();
        assert!(matches!(
            total_value(&holdings, &prices),
            Err(Error::ValueOutOfRange(_))
        ));
    }

    #[test]
    fn value_rounded_to_zero_is_an_error() {
        // 1e-16 × 1e-16 rounds to zero at 28 decimal places
        let tiny = Decimal::new(1, 16);
        let prices = Pricelist::new(asset_map([("ETH", tiny)])).unwrap();
        let holdings = Holdings::new(asset_map([("ETH", tiny)])).unwrap();
        assert_eq!(total_value(&holdings, &prices), Err(Error::ZeroValue));
    }

    #[test]
    fn partly_rounded_position_has_zero_weight() {
        let tiny = Decimal::new(1, 16);
        let prices = Pricelist::new(asset_map([("ETH", tiny), ("BTC", dec!(1))])).unwrap();
        let w = weights(&asset_map([("ETH", tiny), ("BTC", dec!(1))]), &prices).unwrap();
        assert_eq!(w[&Asset::new("ETH")], Decimal::ZERO);
        assert_eq!(w[&Asset::new("BTC")], dec!(1));
    }
}
