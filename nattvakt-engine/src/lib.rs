//! # Nattvakt Engine
//!
//! Wires capture, decoding and detection together: a dispatcher hands
//! each captured frame to an independent analysis task, and the runtime
//! coordinates startup, the interrupt signal and the termination
//! report.

pub mod analysis;
pub mod dispatch;
pub mod error;
pub mod runtime;

pub use analysis::Analyzer;
pub use dispatch::Dispatcher;
pub use error::EngineError;
pub use runtime::run_live;
