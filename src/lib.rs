//! # nanobalance
//!
//! Exact-decimal portfolio rebalancing: given what you hold, what it costs
//! and the weighting you want, compute the buy/sell trades that get you
//! there. Nothing is executed; the result is a plan.
//!
//! ## Features
//!
//! - **Exact arithmetic**: [`rust_decimal::Decimal`] throughout, no binary floats
//! - **Strict validation**: uppercase identifiers, positive amounts, weights summing to exactly 1
//! - **Immutable accounts**: value computed once, safe to share across threads
//! - **Rebalancing into new assets**: unheld index assets are treated as zero positions
//!
//! ## Quick Start
//!
//! ```
//! use nanobalance::{Account, Action, Asset, asset_map};
//! use rust_decimal::Decimal;
//!
//! let holdings = asset_map([("ETH", Decimal::from(42))]);
//! let prices = asset_map([("ETH", Decimal::from(200)), ("BTC", Decimal::from(2000))]);
//! let account = Account::new(holdings, prices).unwrap();
//! assert_eq!(account.value(), Decimal::from(8400));
//!
//! let half = Decimal::new(5, 1);
//! let trades = account.rebalance(asset_map([("ETH", half), ("BTC", half)])).unwrap();
//!
//! let eth = trades[&Asset::new("ETH")];
//! assert_eq!(eth.action, Action::Sell);
//! assert_eq!(eth.amount, Decimal::from(21));
//!
//! let btc = trades[&Asset::new("BTC")];
//! assert_eq!(btc.action, Action::Buy);
//! assert_eq!(btc.amount, Decimal::new(21, 1)); // 2.1 BTC
//! ```
//!
//! ## Validation
//!
//! | Input | Rules |
//! |-------|-------|
//! | Pricelist | non-empty, uppercase keys, prices > 0 |
//! | Holdings | non-empty, uppercase keys, amounts > 0, every asset priced |
//! | Target index | non-empty, uppercase keys, weights > 0, every asset priced, Σ = 1 exactly |
//! | Account value | Σ quantity × price within `Decimal` range and non-zero after rounding |
//!
//! `Decimal` carries 28 significant digits. Quotients and products that need
//! more are rounded; results past `Decimal::MAX` are reported as
//! [`Error::ValueOutOfRange`], never as a panic.
//!
//! ```
//! use nanobalance::{Account, Error, asset_map};
//! use rust_decimal::Decimal;
//!
//! let account = Account::new(
//!     asset_map([("ETH", Decimal::ONE)]),
//!     asset_map([("ETH", Decimal::from(200)), ("BTC", Decimal::from(5000))]),
//! )
//! .unwrap();
//!
//! let fifth = Decimal::new(2, 1);
//! let err = account.rebalance(asset_map([("ETH", fifth), ("BTC", fifth)])).unwrap_err();
//! assert_eq!(err, Error::IndexSumIncorrect(Decimal::new(4, 1)));
//! ```
//!
//! ## Shared prices
//!
//! A [`PriceSource`] holds a replaceable pricelist that several accounts
//! can be built from. Replacing it never affects accounts already built.

pub mod account;
pub mod asset;
pub mod error;
pub mod holdings;
pub mod index;
pub mod pricelist;
mod rebalance;
pub mod source;
pub mod trade;
mod validate;
pub mod valuation;

pub use account::Account;
pub use asset::{Asset, AssetMap, asset_map};
pub use error::{Error, InputKind, Result};
pub use holdings::Holdings;
pub use index::TargetIndex;
pub use pricelist::Pricelist;
pub use source::PriceSource;
pub use trade::{Action, Trade, Trades, project_holdings};

pub use rust_decimal::Decimal;
