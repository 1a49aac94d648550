// Entry point for fraud graph construction. Loads configuration, reads the
// transaction snapshot, builds the graph and writes the artifact.
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fraud_graph::config::{AppConfig, InputConfig, DEFAULT_CONFIG_PATH};
use fraud_graph::csv_reader::{read_records, read_transactions};
use fraud_graph::{BincodeStore, EntityListings, GraphBuilder};

// Reads one optional listing file
fn read_listing<T: DeserializeOwned>(path: Option<&Path>, kind: &str) -> Result<Option<Vec<T>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let records: Vec<T> =
        read_records(path).with_context(|| format!("Failed to read {} listing {}", kind, path.display()))?;
    info!("Loaded {} {} listings from {}", records.len(), kind, path.display());
    Ok(Some(records))
}

fn load_listings(input: &InputConfig) -> Result<EntityListings> {
    Ok(EntityListings {
        accounts: read_listing(input.accounts.as_deref(), "account")?,
        merchants: read_listing(input.merchants.as_deref(), "merchant")?,
        devices: read_listing(input.devices.as_deref(), "device")?,
    })
}

// Main entry point
// Inputs: optional config path as the first argument (default config/graph.toml)
// Outputs: graph artifact and statistics in the configured output directory
// Key steps:
// 1. Load configuration and set up logging
// 2. Read transactions and any entity listings
// 3. Build the graph and split
// 4. Save the artifact
fn main() -> Result<()> {
    let config_path = std::env::args().nth(1);
    let config = match &config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();
    info!(
        "Configuration loaded from {}",
        config_path.as_deref().unwrap_or(DEFAULT_CONFIG_PATH)
    );

    let transactions = read_transactions(&config.input.transactions)
        .with_context(|| format!("Failed to read transactions from {}", config.input.transactions.display()))?;
    info!("Loaded {} transactions", transactions.len());
    let listings = load_listings(&config.input)?;
    if listings.is_empty() {
        info!("No entity listings configured; entities are derived from transactions alone");
    }

    let store = BincodeStore::new(&config.output.dir);
    let artifact = GraphBuilder::from_config(&config)
        .build_into(&transactions, &listings, &store)
        .context("Graph construction failed")?;

    let (train, val, test) = artifact.split.counts();
    info!(
        "Done: {} account nodes (train {}, val {}, test {}) written to {}",
        artifact.graph.account_labels.len(),
        train,
        val,
        test,
        store.artifact_path().display()
    );

    Ok(())
}
