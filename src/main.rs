use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use sitegate::catalog::Catalog;
use sitegate::config::{Command, Config};
use sitegate::domain::SiteId;
use sitegate::observability::{init_tracing, MetricsRegistry};
use sitegate::procurement::Procurement;
use sitegate::storage::PolicyStore;

fn main() -> anyhow::Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    init_tracing(&config.log_level, config.log_json);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting sitegate");

    let store = PolicyStore::open(&config.store_path).with_context(|| {
        format!("failed to open policy store {}", config.store_path.display())
    })?;
    let catalog = Catalog::from_path(&config.catalog_path).with_context(|| {
        format!("failed to load vendor catalog {}", config.catalog_path.display())
    })?;

    let metrics = Arc::new(MetricsRegistry::new());
    let procurement = Procurement::new(store, catalog).with_metrics(metrics.clone());

    match config.command {
        Command::StoreRules {
            site,
            limit,
            banned,
        } => {
            let record = procurement.store_site_rules(site.as_str(), limit, banned)?;
            print_json(&record)?;
        }
        Command::Order {
            site,
            item,
            quantity,
        } => {
            let outcome = procurement.evaluate_order(site.as_str(), item, quantity)?;
            print_json(&outcome)?;
        }
        Command::ShowRules { site } => {
            let sites = match site {
                Some(s) => vec![SiteId::new(s)],
                None => procurement.store().sites()?,
            };
            for site in sites {
                match procurement.store().read_site_rules(&site)? {
                    Some(record) => print_json(&record)?,
                    None => println!("no rules set for site '{}'", site),
                }
            }
        }
        Command::Demo => run_demo(&procurement)?,
    }

    if config.print_metrics {
        eprintln!("{}", metrics.to_prometheus());
    }

    Ok(())
}

/// Two-turn walkthrough: ingest the Pune rules, then order cement.
fn run_demo(procurement: &Procurement) -> anyhow::Result<()> {
    println!("--- TURN 1: Rule Ingestion ---");
    let record =
        procurement.store_site_rules("Pune", Decimal::new(40000, 0), ["BadRock Cements"])?;
    print_json(&record)?;

    println!("--- TURN 2: Procurement Order ---");
    let outcome = procurement.evaluate_order("Pune", "cement", 100)?;
    print_json(&outcome)?;

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
