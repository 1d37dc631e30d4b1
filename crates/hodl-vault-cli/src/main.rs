//! hodl-vault CLI — generate Simplicity HODL vault contracts and fund their
//! deposit addresses from the Liquid testnet faucet.
//!
//! Two commands cover the lifecycle: `generate` runs the render → compile →
//! derive pipeline from [`hodl_vault_core::pipeline`], and `fund` requests
//! test funds for an address via [`hodl_vault_core::faucet`].

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hodl-vault",
    about = "Generate oracle-gated HODL vault contracts for Liquid testnet",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to hodl-vault.config.json (defaults apply if it does not exist)
    #[arg(long, global = true, default_value = "hodl-vault.config.json")]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a vault contract and derive its deposit address
    Generate {
        /// Minimum block height before the vault can be spent
        #[arg(long)]
        block_height: i64,

        /// Minimum oracle price required to spend
        #[arg(long)]
        price: f64,

        /// Optional label for the vault
        #[arg(long)]
        name: Option<String>,

        /// Optional description for the vault
        #[arg(long)]
        description: Option<String>,

        /// Request test funds for the derived address after generation
        #[arg(long)]
        fund: bool,

        /// Write the rendered witness skeleton into this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print the result as a JSON payload instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Request test funds from the faucet for an existing address
    Fund {
        /// Deposit address to fund
        #[arg(long)]
        address: String,

        /// Print the result as a JSON payload instead of formatted text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Generate {
            block_height,
            price,
            name,
            description,
            fund,
            out_dir,
            json,
        } => {
            commands::generate::run(
                &cli.config,
                block_height,
                price,
                name,
                description,
                fund,
                out_dir.as_deref(),
                json,
            )
            .await?;
        }
        Commands::Fund { address, json } => {
            commands::fund::run(&cli.config, &address, json).await?;
        }
    }

    Ok(())
}
