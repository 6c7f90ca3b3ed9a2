use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use merkle_distributor::rewards::total_supply;
use merkle_distributor::{hex_encode, parse_amount, reward_per_token, weekly_distribution};

use crate::files::{emit_distribution, load_balances};

#[derive(Parser, Debug)]
#[command(group(
    clap::ArgGroup::new("rate")
        .required(true)
        .args(["reward_per_token", "total_reward"])
))]
pub struct Args {
    /// Holder balance snapshot JSON (`{"0xaddress": "balance"}`)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Reward per token held, scaled by 10^18
    #[arg(long)]
    pub reward_per_token: Option<String>,

    /// Total reward for the week, split pro rata over the snapshot supply
    #[arg(long)]
    pub total_reward: Option<String>,

    /// Output artifact JSON (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &Args) -> Result<()> {
    let balances = load_balances(&args.input)?;

    let rate = match (&args.reward_per_token, &args.total_reward) {
        (Some(rate), _) => parse_amount(rate).context("Invalid reward per token")?,
        (None, Some(total)) => {
            let total = parse_amount(total).context("Invalid total reward")?;
            let supply = total_supply(&balances).context("Invalid snapshot supply")?;
            let rate = reward_per_token(total, supply).context("Cannot derive reward rate")?;
            info!("Snapshot supply {} gives reward per token {}", supply, rate);
            rate
        }
        (None, None) => anyhow::bail!("Either --reward-per-token or --total-reward is required"),
    };

    info!("Computing weekly rewards...");
    let dist = weekly_distribution(&balances, rate)
        .context("Failed to build weekly distribution")?;

    info!(
        "Merkle root: {} ({} of {} holders rewarded)",
        hex_encode(dist.merkle_root),
        dist.len(),
        balances.len()
    );
    emit_distribution(&dist, args.output.as_deref())
}
