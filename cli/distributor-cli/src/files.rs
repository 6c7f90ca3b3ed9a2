use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

use merkle_distributor::{
    parse_balance_snapshot, write_file_atomic, Address, Distribution, DistributionArtifact, U256,
};

pub fn load_balances(path: &Path) -> Result<BTreeMap<Address, U256>> {
    info!("Reading balances from {:?}...", path);
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read balance snapshot {:?}", path))?;
    let balances = parse_balance_snapshot(&json).context("Invalid balance snapshot")?;
    info!("Loaded {} balances", balances.len());
    Ok(balances)
}

pub fn load_distribution(path: &Path) -> Result<Distribution> {
    info!("Reading artifact from {:?}...", path);
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read artifact {:?}", path))?;
    let raw = DistributionArtifact::from_json(&json).context("Failed to parse artifact JSON")?;
    Distribution::try_from(&raw).context("Invalid artifact contents")
}

/// Writes `json` to `output` atomically, or to stdout when no path is given.
pub fn emit(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            info!("Writing {:?}...", path);
            write_file_atomic(path, json).with_context(|| format!("Failed to write {:?}", path))
        }
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

pub fn emit_distribution(dist: &Distribution, output: Option<&Path>) -> Result<()> {
    let json = DistributionArtifact::from(dist)
        .to_json_pretty()
        .context("Failed to serialize artifact")?;
    emit(&json, output)
}
