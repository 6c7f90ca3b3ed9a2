#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

use merkle_distributor::logging::{self, LogLevel};

mod build_tree;
mod claim;
mod files;
mod verify_artifact;
mod weekly;

#[derive(Parser, Debug)]
#[command(name = "distributor")]
#[command(about = "Merkle distribution builder and claim verifier", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a distribution artifact from a balance snapshot
    BuildTree(build_tree::Args),
    /// Compute weekly rewards from holder balances and build their distribution
    Weekly(weekly::Args),
    /// Extract and check one account's claim
    Claim(claim::Args),
    /// Check every proof, index and total in an artifact
    Verify(verify_artifact::Args),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::try_init(LogLevel::from_flags(cli.verbose, cli.quiet))
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    match cli.command {
        Commands::BuildTree(args) => build_tree::run(&args)?,
        Commands::Weekly(args) => weekly::run(&args)?,
        Commands::Claim(args) => claim::run(&args)?,
        Commands::Verify(args) => verify_artifact::run(&args)?,
    }

    Ok(())
}
