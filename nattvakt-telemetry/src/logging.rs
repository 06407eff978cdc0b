//! Structured logging with tracing.
//!
//! Detection events (blacklist violations, allocation pressure) are
//! emitted as structured `security_event` records so downstream log
//! collectors can key on the event type.

use opentelemetry::KeyValue;
use tracing::info_span;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber; call once at process start.
    pub fn init() {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_thread_names(true)
            .with_span_events(FmtSpan::ENTER)
            .init()
    }

    /// Emits one structured security event.
    pub fn log_event(event_type: &str, metadata: Vec<KeyValue>) {
        let span = info_span!("security_event", event_type = event_type);
        let _guard = span.enter();
        tracing::info!(metadata = ?metadata, "Security event occurred");
    }
}
