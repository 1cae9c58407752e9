//! Run orchestrator: load → validate → rebalance → report.
//!
//! This is the main workflow that ties together all components.

use log::{info, warn};
use nanobalance::{Account, Asset, AssetMap, Decimal, Pricelist, TargetIndex};

use crate::audit::{self, AuditLog};
use crate::config::Config;
use crate::error::Result;
use crate::input;
use crate::plan::Plan;
use crate::reconcile;
use crate::target::TargetSpec;

/// Options for a plan run.
pub struct RunOptions {
    pub target_file: String,
    /// Skip the audit trail (e.g. read-only previews).
    pub no_audit: bool,
}

/// Load the configured holdings and pricelist into an account.
pub fn load_account(config: &Config) -> Result<Account> {
    let prices = Pricelist::new(input::load_asset_map(&config.pricing.pricelist)?)?;
    let holdings = input::load_asset_map(&config.account.holdings)?;
    info!(
        "loaded {} holdings, {} prices",
        holdings.len(),
        prices.len()
    );
    Ok(Account::with_pricelist(holdings, prices)?)
}

/// Compute and print the trades for a target. Returns the plan.
pub fn run_plan(config: &Config, target: &TargetSpec, opts: &RunOptions) -> Result<Plan> {
    let mut audit = if opts.no_audit {
        None
    } else {
        Some(AuditLog::open(&config.audit_path())?)
    };
    if let Some(audit) = audit.as_mut() {
        audit::log_run_started(audit, &opts.target_file, &config.account.id)?;
    }

    let account = load_account(config)?;
    if let Some(audit) = audit.as_mut() {
        audit::log_inputs(audit, &account)?;
    }

    let index = target.as_index();
    let opening = new_assets(&account, &index);
    if !opening.is_empty() {
        info!("opening new positions: {opening:?}");
    }

    let trades = account.rebalance(index)?;
    let plan = Plan::new(&account, &trades, config.display.decimals)?;
    if !plan.untouched.is_empty() {
        warn!(
            "{} held assets are not in the target and keep their quantity",
            plan.untouched.len()
        );
    }

    println!("Account {}: target as of {}", config.account.id, target.timestamp);
    print!("\n{plan}");
    if plan.is_noop() {
        println!("\nNo rebalancing needed - portfolio matches target.");
    }

    if let Some(audit) = audit.as_mut() {
        audit::log_trades(audit, &plan)?;
        audit::log_run_completed(audit, plan.entries.len(), plan.is_noop())?;
        info!("audit logged to {}", config.audit_path().display());
    }

    Ok(plan)
}

/// Show holdings with their value and weight.
pub fn show_value(config: &Config) -> Result<()> {
    let account = load_account(config)?;
    print!(
        "{}",
        value_table(&account, config.display.decimals, &config.account.id)
    );
    Ok(())
}

/// Print the drift between current weights and a target.
///
/// The target is validated exactly as `plan` validates it.
pub fn run_drift(config: &Config, target: &TargetSpec) -> Result<reconcile::DriftReport> {
    let account = load_account(config)?;
    let index = TargetIndex::new(target.as_index(), account.pricelist())?;
    let report = reconcile::drift(&account, &index, config.display.decimals);
    print!("{report}");
    Ok(report)
}

// === Helpers ===

/// Current holdings table, sorted by asset.
pub fn value_table(account: &Account, decimals: u32, account_id: &str) -> String {
    let weights = account.weights();
    let prices = account.pricelist();

    let mut held: Vec<(&Asset, &Decimal)> = account.holdings().iter().collect();
    held.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = format!(
        "Account {account_id}: total value {}\n\nHOLDINGS:\n",
        account.value().round_dp(decimals).normalize()
    );
    for (asset, qty) in held {
        let price = prices[asset];
        out.push_str(&format!(
            "  {:8} {:>18} @ {:>14} = {:>16}  ({}%)\n",
            asset.as_str(),
            qty.round_dp(decimals).normalize(),
            price.round_dp(decimals).normalize(),
            (*qty * price).round_dp(decimals).normalize(),
            (weights.get(asset).copied().unwrap_or(Decimal::ZERO) * Decimal::ONE_HUNDRED)
                .round_dp(2),
        ));
    }
    out
}

/// Assets in the target that are not currently held.
pub fn new_assets(account: &Account, target: &AssetMap) -> Vec<Asset> {
    let mut assets: Vec<Asset> = target
        .keys()
        .filter(|a| !account.holdings().contains(a))
        .cloned()
        .collect();
    assets.sort();
    assets
}
