//! Steem capacity CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                       steem-capacity                          │
//!   │                                                                │
//!   │  ┌──────────────┐    ┌──────────────┐    ┌────────────────┐   │
//!   │  │ AccountFacade│───▶│   ChainApi   │───▶│   RpcGateway   │───┼──▶ Steem node
//!   │  └──────┬───────┘    └──────┬───────┘    └────────────────┘   │
//!   │         │                   │ RetryExecutor wraps every call   │
//!   │         ▼                   ▼                                  │
//!   │  ┌──────────────┐    ┌──────────────────┐                      │
//!   │  │  Resource    │    │ OperationExtractor│                     │
//!   │  │  Calculator  │    │ (block flattening)│                     │
//!   │  └──────────────┘    └──────────────────┘                      │
//!   │                                                                │
//!   │  config · observability · resilience                           │
//!   └──────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use steem_capacity::config::load_config;
use steem_capacity::observability::{logging, metrics};
use steem_capacity::AccountFacade;

#[derive(Parser)]
#[command(name = "steem-capacity")]
#[command(about = "Query Steem account capacity and block operations", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Voting power, resource credits, stake and balances of an account
    Balance { account: String },
    /// Current head (or last irreversible) block number
    Head {
        #[arg(long)]
        irreversible: bool,
    },
    /// Raw block
    Block { number: u64 },
    /// Ordered operations of a block range (virtual operations excluded)
    Operations { start: u64, end: Option<u64> },
    /// Content by author and permlink
    Content {
        author: String,
        permlink: String,
        #[arg(long, default_value = "")]
        voter: String,
    },
    /// State tree for a site path (e.g. /trending)
    State { path: String },
    /// Most recent post of a user
    Recent { username: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!(
        rpc_url = %config.rpc.url,
        max_retries = config.retries.max_retries,
        retry_delay_ms = config.retries.delay_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let facade = AccountFacade::new(&config)?;
    let api = facade.api();

    match cli.command {
        Commands::Balance { account } => print_json(&facade.capacity_report(&account).await?)?,
        Commands::Head { irreversible } => {
            print_json(&api.get_head_block_number(!irreversible).await?)?
        }
        Commands::Block { number } => print_json(&api.get_block(number).await?)?,
        Commands::Operations { start, end } => {
            print_json(&api.get_operations(start, end).await?)?
        }
        Commands::Content {
            author,
            permlink,
            voter,
        } => print_json(&api.get_content(&author, &permlink, &voter).await?)?,
        Commands::State { path } => print_json(&api.get_state_with(&path).await?)?,
        Commands::Recent { username } => {
            print_json(&api.get_recent_content(&username).await?)?
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
