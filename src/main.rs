//! `trx-burst-gen` entry point.
//!
//! Owns process setup only: banner, logging, argument parsing, signal
//! handling and the exit status. Burst sending lives in the library.
//!
//! Set `RUST_LOG` to control verbosity (default `info`).

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trx_burst_gen::cli::{Cli, banner};
use trx_burst_gen::lifecycle::Lifecycle;
use trx_burst_gen::session::{RunOutcome, execute};

#[tokio::main]
async fn main() -> ExitCode {
    println!("{}", banner());

    let cli = Cli::parse();
    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => Cli::command().error(ErrorKind::ValueValidation, e).exit(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let lifecycle = Lifecycle::new();
    let _signal = lifecycle.install();

    match execute(&config, &lifecycle).await {
        Ok(outcome) => {
            match outcome {
                RunOutcome::Completed { sent } => info!(sent, "done"),
                RunOutcome::Interrupted { sent } => info!(sent, "stopped by signal"),
            }
            ExitCode::from(outcome.exit_status())
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_status())
        }
    }
}
