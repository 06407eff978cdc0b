//! ## nattvakt-cli
//! Operator entrypoint: parses arguments, starts the live analyzer and
//! prints the intrusion-detection report once capture is interrupted.

use clap::Parser;

use nattvakt_telemetry::logging::EventLogger;
use nattvakt_telemetry::metrics::MetricsRecorder;

mod commands;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    EventLogger::init();
    let metrics = MetricsRecorder::new();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(run_args) => commands::run_live_mode(run_args, metrics).await,
    }
}
