use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use nattvakt_config::NattvaktConfig;
use nattvakt_engine::run_live;
use nattvakt_telemetry::metrics::MetricsRecorder;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Monitor one interface until interrupted, then print a report
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Network interface to monitor (overrides configuration)
    #[arg(short, long)]
    pub interface: Option<String>,

    /// Dump decoded headers for every captured frame
    #[arg(short, long)]
    pub verbose: bool,

    /// Optional configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub async fn run_live_mode(
    args: RunArgs,
    metrics: MetricsRecorder,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = match &args.config {
        Some(path) => NattvaktConfig::load_from_path(path)?,
        None => NattvaktConfig::load()?,
    };
    if let Some(interface) = args.interface {
        config.capture.interface = interface;
    }
    if args.verbose {
        config.capture.verbose = true;
    }

    let report = run_live(config, metrics).await?;

    // Termination report for the operator; counters are best-effort
    // sums up to the moment of the snapshot.
    println!("\n{report}");
    info!("shutdown complete");
    Ok(())
}
