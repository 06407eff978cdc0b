//! # Nattvakt Capture
//!
//! Live packet acquisition for the analyzer. Opens one network
//! interface through pcap and hands every captured frame to a callback
//! until the terminate flag is raised.

pub mod frame;
pub mod live;

pub use frame::Frame;
pub use live::{run_capture_loop, CaptureError};
