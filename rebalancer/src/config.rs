//! TOML configuration loading and validation.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub account: AccountConfig,
    pub pricing: PricingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub id: String,
    /// JSON file of asset → held quantity.
    pub holdings: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// JSON file of asset → unit price.
    pub pricelist: PathBuf,
}

/// Output formatting only; computed trades are never rounded.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_decimals")]
    pub decimals: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
        }
    }
}

fn default_decimals() -> u32 {
    8
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_audit_file")]
    pub audit_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            audit_file: default_audit_file(),
        }
    }
}

fn default_log_dir() -> String {
    "./logs".into()
}
fn default_audit_file() -> String {
    "audit.jsonl".into()
}

impl Config {
    /// Load config from a TOML file.
    ///
    /// Relative input paths are resolved against the config file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config = Self::from_toml(&contents)?;
        if let Some(base) = path.parent() {
            config.account.holdings = base.join(&config.account.holdings);
            config.pricing.pricelist = base.join(&config.pricing.pricelist);
        }
        Ok(config)
    }

    /// Parse and validate from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        if self.account.id.is_empty() {
            return Err(Error::Config("account id must not be empty".into()));
        }
        if self.account.holdings.as_os_str().is_empty() {
            return Err(Error::Config("account holdings path must not be empty".into()));
        }
        if self.pricing.pricelist.as_os_str().is_empty() {
            return Err(Error::Config("pricelist path must not be empty".into()));
        }
        if self.display.decimals > 28 {
            return Err(Error::Config("display decimals must be in [0, 28]".into()));
        }
        if self.logging.audit_file.is_empty() {
            return Err(Error::Config("audit file name must not be empty".into()));
        }
        Ok(())
    }

    /// Full path to the audit log file.
    pub fn audit_path(&self) -> PathBuf {
        Path::new(&self.logging.dir).join(&self.logging.audit_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_toml() -> &'static str {
        r#"
[account]
id = "main"
holdings = "holdings.json"

[pricing]
pricelist = "prices.json"

[display]
decimals = 4

[logging]
dir = "./logs"
audit_file = "audit.jsonl"
"#
    }

    #[test]
    fn parse_example_config() {
        let config = Config::from_toml(example_toml()).unwrap();
        assert_eq!(config.account.id, "main");
        assert_eq!(config.account.holdings, PathBuf::from("holdings.json"));
        assert_eq!(config.pricing.pricelist, PathBuf::from("prices.json"));
        assert_eq!(config.display.decimals, 4);
    }

    #[test]
    fn defaults_apply() {
        let toml = r#"
[account]
id = "main"
holdings = "h.json"

[pricing]
pricelist = "p.json"
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.display.decimals, 8);
        assert_eq!(config.logging.dir, "./logs");
        assert_eq!(config.logging.audit_file, "audit.jsonl");
    }

    #[test]
    fn validate_catches_empty_id() {
        let mut config = Config::from_toml(example_toml()).unwrap();
        config.account.id.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_catches_bad_decimals() {
        let mut config = Config::from_toml(example_toml()).unwrap();
        config.display.decimals = 29;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn missing_section_is_parse_error() {
        let toml = "[account]\nid = \"main\"\nholdings = \"h.json\"\n";
        assert!(matches!(Config::from_toml(toml), Err(Error::ConfigParse(_))));
    }

    #[test]
    fn audit_path() {
        let config = Config::from_toml(example_toml()).unwrap();
        assert_eq!(config.audit_path(), PathBuf::from("./logs/audit.jsonl"));
    }

    #[test]
    fn load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, example_toml()).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.account.holdings, dir.path().join("holdings.json"));
        assert_eq!(config.pricing.pricelist, dir.path().join("prices.json"));
    }

    #[test]
    fn load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
