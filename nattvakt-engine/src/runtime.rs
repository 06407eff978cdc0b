//! Live-mode runtime: capture loop, interrupt handling, termination
//! report.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::spawn_blocking;
use tracing::{info, warn};

use nattvakt_config::NattvaktConfig;
use nattvakt_detection::{ReportSnapshot, StatStore};
use nattvakt_telemetry::MetricsRecorder;

use crate::analysis::Analyzer;
use crate::dispatch::Dispatcher;
use crate::error::EngineError;

/// Runs live capture and analysis until an interrupt signal arrives,
/// then returns the termination snapshot for the reporting collaborator.
///
/// The capture loop runs on a blocking thread and only ever spawns
/// analysis work through the dispatcher; nothing a task does can stall
/// or fail the loop. In-flight analysis at shutdown is drained in pool
/// mode and abandoned in task-per-frame mode.
pub async fn run_live(
    config: NattvaktConfig,
    metrics: MetricsRecorder,
) -> Result<ReportSnapshot, EngineError> {
    info!("starting live analysis on {}", config.capture.interface);

    let stats = Arc::new(StatStore::new());
    let analyzer = Arc::new(Analyzer::new(
        Arc::clone(&stats),
        metrics.clone(),
        config.capture.verbose,
    )?);
    let dispatcher = Arc::new(Dispatcher::new(
        &config.dispatch,
        analyzer,
        metrics.clone(),
    ));

    let terminate = Arc::new(AtomicBool::new(false));

    // The interrupt signal is the only shutdown path; it raises the
    // terminate flag the capture loop polls between timeouts.
    let signal_task = tokio::spawn({
        let terminate = Arc::clone(&terminate);
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, stopping capture");
                terminate.store(true, Ordering::Relaxed);
            }
        }
    });

    let capture_result = spawn_blocking({
        let capture = config.capture.clone();
        let dispatcher = Arc::clone(&dispatcher);
        let metrics = metrics.clone();
        let terminate = Arc::clone(&terminate);
        move || {
            nattvakt_capture::run_capture_loop(
                &capture.interface,
                capture.snaplen,
                capture.promiscuous,
                &terminate,
                |frame| {
                    metrics.frames_captured.inc();
                    dispatcher.dispatch(frame);
                },
            )
        }
    })
    .await?;

    signal_task.abort();

    // Stop accepting frames and drain whatever is queued before the
    // snapshot is taken.
    let shutdown_dispatcher = Arc::clone(&dispatcher);
    spawn_blocking(move || shutdown_dispatcher.shutdown()).await?;

    if let Err(e) = capture_result {
        warn!("capture ended with error: {e}");
        return Err(e.into());
    }

    Ok(stats.snapshot())
}
