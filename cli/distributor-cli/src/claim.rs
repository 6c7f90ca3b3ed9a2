use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use merkle_distributor::artifact::ClaimArtifact;
use merkle_distributor::{hex_encode, parse_address, verified_claim};

use crate::files::{emit, load_distribution};

#[derive(Parser, Debug)]
pub struct Args {
    /// Distribution artifact JSON
    #[arg(short = 'a', long)]
    pub artifact: PathBuf,

    /// Claimant address
    #[arg(short = 'c', long)]
    pub account: String,

    /// Output claim JSON (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &Args) -> Result<()> {
    let account = parse_address(&args.account).context("Invalid account address")?;
    let dist = load_distribution(&args.artifact)?;

    info!("Looking up {}...", hex_encode(account));
    if dist.claim(&account).is_none() {
        anyhow::bail!("Account {} has no claim in this distribution", hex_encode(account));
    }
    let entry = verified_claim(&dist, &account).with_context(|| {
        format!(
            "Proof for {} does not verify against root {}",
            hex_encode(account),
            hex_encode(dist.merkle_root)
        )
    })?;

    info!(
        "Claim index {} (amount {}) verified with {} proof nodes",
        entry.claim.index,
        entry.claim.amount,
        entry.proof.len()
    );
    let json = serde_json::to_string_pretty(&ClaimArtifact::from(entry))
        .context("Failed to serialize claim")?;
    emit(&json, args.output.as_deref())
}
