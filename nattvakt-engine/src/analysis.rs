//! Per-frame analysis: decode once, then run every applicable detector.

use std::sync::Arc;
use std::time::Instant;

use opentelemetry::KeyValue;
use tracing::{debug, info, warn};

use nattvakt_capture::Frame;
use nattvakt_detection::{arp_reply, syn_flood, BlacklistEngine, StatStore};
use nattvakt_protocols::{decode, dump, DecodedFrame};
use nattvakt_telemetry::{EventLogger, MetricsRecorder};

use crate::error::EngineError;

/// Analyzes one frame at a time against the shared counter store.
///
/// Stateless per call; every invocation decodes its own frame and the
/// only shared mutation goes through [`StatStore`]. Decode failures are
/// absorbed here and never reach the dispatcher or the capture loop.
pub struct Analyzer {
    stats: Arc<StatStore>,
    blacklist: BlacklistEngine,
    metrics: MetricsRecorder,
    verbose: bool,
}

impl Analyzer {
    pub fn new(
        stats: Arc<StatStore>,
        metrics: MetricsRecorder,
        verbose: bool,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            stats,
            blacklist: BlacklistEngine::new()?,
            metrics,
            verbose,
        })
    }

    /// Runs the full detection pass over one owned frame.
    pub fn analyze(&self, frame: &Frame) {
        let start = Instant::now();

        match decode(&frame.data) {
            Ok(decoded) => {
                if self.verbose {
                    info!("\n{}", dump::render_frame(&decoded));
                }
                self.inspect(&decoded);
            }
            Err(e) => {
                debug!("dropping undecodable frame ({} bytes): {e}", frame.captured_len());
                self.metrics.decode_failures.inc();
            }
        }

        self.metrics
            .analysis_latency
            .observe(start.elapsed().as_nanos() as f64);
    }

    fn inspect(&self, decoded: &DecodedFrame<'_>) {
        match decoded {
            DecodedFrame::Arp { arp, .. } => arp_reply::inspect(arp, &self.stats),
            DecodedFrame::Tcp(segment) => {
                syn_flood::inspect(segment, &self.stats);
                if let Some(alert) = self.blacklist.inspect(segment, &self.stats) {
                    warn!("{alert}");
                    EventLogger::log_event(
                        "blacklist_violation",
                        vec![
                            KeyValue::new("source", alert.source.to_string()),
                            KeyValue::new("destination", alert.destination.to_string()),
                            KeyValue::new("host", alert.host),
                        ],
                    );
                }
            }
            DecodedFrame::Ipv4 { .. } | DecodedFrame::Other { .. } => {}
        }
    }

    /// Snapshot of the shared counters backing this analyzer.
    pub fn stats(&self) -> &StatStore {
        &self.stats
    }
}
