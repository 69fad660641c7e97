//! # BloomJoin Runtime
//!
//! Entry point: validate the two positional sizing arguments, bring up the
//! two fixture nodes, run the demo semi-join and classic comparison, then
//! sweep the parameter grid into the CSV report.

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use join_runtime::{cli, runtime};

#[tokio::main]
async fn main() -> Result<()> {
    // Bad sizing is the graceful abort: usage on stdout, exit status zero,
    // no node ever touched.
    let Some(args) = cli::parse_args(std::env::args()) else {
        println!("{}", cli::USAGE);
        return Ok(());
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting tracing subscriber")?;

    info!(
        slot_count = args.slot_count,
        hash_count = args.hash_count,
        "Starting BloomJoin runtime"
    );

    runtime::run(args).await
}
