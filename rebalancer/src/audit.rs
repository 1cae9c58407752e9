//! JSONL audit trail logging.
//!
//! Each rebalancer run appends events to an audit.jsonl file,
//! one JSON object per line.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use nanobalance::Account;
use serde::Serialize;

use crate::error::Result;
use crate::plan::Plan;

/// An audit event written to the JSONL trail.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub event: &'static str,
    pub ts: DateTime<Utc>,
    #[serde(flatten)]
    pub data: serde_json::Value,
}

/// Append-only audit logger.
pub struct AuditLog {
    writer: BufWriter<std::fs::File>,
}

impl AuditLog {
    /// Open (or create) the audit log file for appending.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Log an event with arbitrary JSON data.
    pub fn log(&mut self, event: &'static str, data: serde_json::Value) -> Result<()> {
        let entry = AuditEvent {
            event,
            ts: Utc::now(),
            data,
        };
        let json = serde_json::to_string(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Log a simple event with no additional data.
    pub fn log_simple(&mut self, event: &'static str) -> Result<()> {
        self.log(event, serde_json::json!({}))
    }
}

/// Convenience: log a run start event.
pub fn log_run_started(audit: &mut AuditLog, target_file: &str, account_id: &str) -> Result<()> {
    audit.log(
        "run_started",
        serde_json::json!({
            "target_file": target_file,
            "account": account_id,
        }),
    )
}

/// Convenience: log the validated inputs the plan is based on.
pub fn log_inputs(audit: &mut AuditLog, account: &Account) -> Result<()> {
    let mut holdings: Vec<_> = account.holdings().iter().collect();
    holdings.sort_by(|a, b| a.0.cmp(b.0));
    let holding_data: Vec<_> = holdings
        .into_iter()
        .map(|(asset, qty)| {
            serde_json::json!({
                "asset": asset.as_str(),
                "qty": qty.normalize().to_string(),
                "price": account.pricelist()[asset].normalize().to_string(),
            })
        })
        .collect();

    audit.log(
        "inputs_loaded",
        serde_json::json!({
            "holdings": holding_data,
            "prices": account.pricelist().len(),
            "value": account.value().normalize().to_string(),
        }),
    )
}

/// Convenience: log computed trades.
pub fn log_trades(audit: &mut AuditLog, plan: &Plan) -> Result<()> {
    let trade_data: Vec<_> = plan
        .entries
        .iter()
        .map(|e| {
            serde_json::json!({
                "asset": e.asset.as_str(),
                "action": e.trade.action.to_string(),
                "amount": e.trade.amount.normalize().to_string(),
                "price": e.price.normalize().to_string(),
            })
        })
        .collect();

    audit.log("trades_computed", serde_json::json!({ "trades": trade_data }))
}

/// Convenience: log run completion.
pub fn log_run_completed(audit: &mut AuditLog, trades: usize, noop: bool) -> Result<()> {
    audit.log(
        "run_completed",
        serde_json::json!({
            "trades": trades,
            "noop": noop,
        }),
    )
}
