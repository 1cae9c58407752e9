//! Target index specification (target.json) loading.

use std::path::Path;

use chrono::{DateTime, Utc};
use nanobalance::{Asset, AssetMap};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{Error, Result};

/// A target weighting produced by an allocator or written by hand.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetSpec {
    pub timestamp: DateTime<Utc>,
    pub targets: Vec<TargetWeight>,
}

/// A single target entry: asset + weight.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetWeight {
    pub asset: Asset,
    pub weight: Decimal,
}

impl TargetSpec {
    /// Load and check a target.json file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::InputRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&contents)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: TargetSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// File-level checks. Weight rules (case, sign, sum) belong to the engine.
    fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(Error::Input("targets list is empty".into()));
        }

        let mut seen = std::collections::HashSet::new();
        for t in &self.targets {
            if !seen.insert(&t.asset) {
                return Err(Error::Input(format!("duplicate asset: {}", t.asset)));
            }
        }

        Ok(())
    }

    /// Targets as the engine's asset → weight mapping.
    pub fn as_index(&self) -> AssetMap {
        self.targets
            .iter()
            .map(|t| (t.asset.clone(), t.weight))
            .collect()
    }

    pub fn assets(&self) -> Vec<&Asset> {
        self.targets.iter().map(|t| &t.asset).collect()
    }
}
