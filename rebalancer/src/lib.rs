//! nanobalance-rebalancer: file-driven rebalance planning on top of nanobalance.
//!
//! Reads holdings and a pricelist from JSON files named in a TOML config,
//! a target index from a JSON file, and prints the trades that bring the
//! holdings to the target, with a drift report and a JSONL audit trail.
//! Nothing is executed.

pub mod audit;
pub mod config;
pub mod error;
pub mod input;
pub mod plan;
pub mod reconcile;
pub mod target;
pub mod workflow;
