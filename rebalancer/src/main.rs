//! CLI entry point for the nanobalance rebalancer.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use nanobalance_rebalancer::config::Config;
use nanobalance_rebalancer::error::Error;
use nanobalance_rebalancer::target::TargetSpec;
use nanobalance_rebalancer::workflow::{self, RunOptions};

#[derive(Parser)]
#[command(name = "rebalancer")]
#[command(about = "Portfolio rebalancer: holdings + prices + target index -> trades")]
#[command(version)]
struct Cli {
    /// Path to config.toml
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute and print the trades that reach the target
    Plan {
        /// Path to target.json
        target: PathBuf,

        /// Don't append to the audit log
        #[arg(long)]
        no_audit: bool,
    },

    /// Show holdings, their value and current weights
    Value,

    /// Compare current weights vs target
    Drift {
        /// Path to target.json
        target: PathBuf,
    },
}

fn load_target(path: &Path) -> TargetSpec {
    match TargetSpec::load(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading target: {e}");
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Plan { target, no_audit } => {
            let spec = load_target(&target);
            let opts = RunOptions {
                target_file: target.display().to_string(),
                no_audit,
            };
            workflow::run_plan(&config, &spec, &opts).map(|_| ())
        }
        Command::Value => workflow::show_value(&config),
        Command::Drift { target } => {
            let spec = load_target(&target);
            workflow::run_drift(&config, &spec).map(|_| ())
        }
    };

    if let Err(e) = result {
        match &e {
            Error::Rejected(inner) => {
                eprintln!("\nRejected: {inner}");
                process::exit(2);
            }
            _ => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }
}
