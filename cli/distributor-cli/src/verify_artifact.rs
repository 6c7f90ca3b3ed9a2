use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use merkle_distributor::{hex_encode, verify_distribution};

use crate::files::load_distribution;

#[derive(Parser, Debug)]
pub struct Args {
    /// Distribution artifact JSON
    #[arg(short = 'a', long)]
    pub artifact: PathBuf,
}

pub fn run(args: &Args) -> Result<()> {
    let dist = load_distribution(&args.artifact)?;

    info!("Verifying {} claims...", dist.len());
    let failures = verify_distribution(&dist);
    if failures.is_empty() {
        info!("Root {} verified", hex_encode(dist.merkle_root));
        return Ok(());
    }

    for failure in &failures {
        error!("{}", failure);
    }
    anyhow::bail!("Artifact failed verification ({} problems)", failures.len())
}
