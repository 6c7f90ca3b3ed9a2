use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use merkle_distributor::{assemble_balance_map, hex_encode};

use crate::files::{emit_distribution, load_balances};

#[derive(Parser, Debug)]
pub struct Args {
    /// Balance snapshot JSON (`{"0xaddress": "amount"}`)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output artifact JSON (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &Args) -> Result<()> {
    let balances = load_balances(&args.input)?;

    info!("Building Merkle tree...");
    let dist = assemble_balance_map(&balances).context("Failed to assemble distribution")?;

    info!("Merkle root: {}", hex_encode(dist.merkle_root));
    info!("Token total: {}", dist.token_total);
    emit_distribution(&dist, args.output.as_deref())
}
