//! Distance-vector routing simulator binary.
//!
//! Loads a bootstrap topology, then reads commands from stdin and applies
//! them to the in-process router registry. Logs go to stderr.

use clap::Parser;
use dvsim_routing::SharedRegistry;
use std::path::PathBuf;
use tokio::io::BufReader;

mod logging;
mod command;
mod config;
mod console;
mod session;

use config::SimConfig;
use console::Console;
use session::{bootstrap, Session};

/// Interactive distance-vector routing simulator
#[derive(Parser, Debug)]
#[command(name = "dvsim", version, about = "Interactive distance-vector routing simulator")]
struct Args {
    /// Topology file to load at start-up (prompted for when not configured)
    #[arg(long)]
    network: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, default_value = "dvsim.yaml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Extra attempts allowed when a distance does not parse
    #[arg(long)]
    max_input_retries: Option<u32>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init(&args.log_level)?;
    component_info!("main", "Starting dvsim v{}", env!("CARGO_PKG_VERSION"));

    let mut config = SimConfig::load_from_file(&args.config)?;
    if let Some(network) = args.network {
        config.network_file = Some(network);
    }
    if let Some(retries) = args.max_input_retries {
        config.max_input_retries = retries;
    }

    let mut console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());

    let Some(registry) = bootstrap(&mut console, config.network_file.clone()).await? else {
        return Ok(());
    };

    let mut session = Session::new(
        SharedRegistry::new(registry),
        console,
        config.session_config(),
    );
    session.run().await?;

    component_info!("main", "Simulator stopped");
    Ok(())
}
