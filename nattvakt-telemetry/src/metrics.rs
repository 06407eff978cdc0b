//! Prometheus metrics for the capture and analysis path.

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    /// Frames delivered by the capture loop.
    pub frames_captured: Counter,
    /// Frames dropped because the dispatch queue was full.
    pub frames_dropped: Counter,
    /// Frames rejected by the header decoder.
    pub decode_failures: Counter,
    /// Per-frame analysis time.
    pub analysis_latency: Histogram,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let frames_captured =
            Counter::new("nattvakt_frames_captured_total", "Frames delivered by capture")
                .expect("valid counter spec");
        let frames_dropped = Counter::new(
            "nattvakt_frames_dropped_total",
            "Frames dropped at the dispatch queue",
        )
        .expect("valid counter spec");
        let decode_failures = Counter::new(
            "nattvakt_decode_failures_total",
            "Frames rejected by the header decoder",
        )
        .expect("valid counter spec");
        let analysis_latency = Histogram::with_opts(
            HistogramOpts::new("nattvakt_analysis_latency_ns", "Per-frame analysis time")
                .buckets(vec![1_000.0, 10_000.0, 100_000.0, 1_000_000.0]),
        )
        .expect("valid histogram spec");

        for collector in [&frames_captured, &frames_dropped, &decode_failures] {
            registry
                .register(Box::new(collector.clone()))
                .expect("unique metric registration");
        }
        registry
            .register(Box::new(analysis_latency.clone()))
            .expect("unique metric registration");

        Self {
            registry,
            frames_captured,
            frames_dropped,
            decode_failures,
            analysis_latency,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}
