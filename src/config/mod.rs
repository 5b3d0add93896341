use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// Harness configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "sitegate")]
#[command(about = "Deterministic site procurement policy engine")]
pub struct Config {
    /// Path to the policy store file
    #[arg(long, default_value = "data/memory.json", env = "SITEGATE_STORE_PATH")]
    pub store_path: PathBuf,

    /// Path to the vendor catalog (YAML or JSON)
    #[arg(long, default_value = "data/vendors.yaml", env = "SITEGATE_CATALOG_PATH")]
    pub catalog_path: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "SITEGATE_LOG_JSON")]
    pub log_json: bool,

    /// Print Prometheus-format metrics to stderr before exiting
    #[arg(long)]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Harness commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Store (replace) the rules for a site
    StoreRules {
        #[arg(long)]
        site: String,

        /// Maximum cost approvable without sign-off
        #[arg(long)]
        limit: Decimal,

        /// Banned vendor name (repeatable)
        #[arg(long = "ban")]
        banned: Vec<String>,
    },

    /// Evaluate an order for a site
    Order {
        #[arg(long)]
        site: String,

        #[arg(long)]
        item: String,

        #[arg(long, default_value = "1")]
        quantity: u32,
    },

    /// Show stored rules for one site, or all sites
    ShowRules {
        #[arg(long)]
        site: Option<String>,
    },

    /// Run the two-turn Pune walkthrough
    Demo,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_path: PathBuf::from("data/memory.json"),
            catalog_path: PathBuf::from("data/vendors.yaml"),
            log_level: "info".to_string(),
            log_json: false,
            print_metrics: false,
            command: Command::Demo,
        }
    }
}
