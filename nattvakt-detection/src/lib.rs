//! # Nattvakt Detection Engine
//!
//! Three independent analyzers over decoded headers: bare-SYN flood
//! tracking, ARP reply counting and HTTP host blacklisting, all
//! mutating one shared [`StatStore`]. Detectors never block on I/O;
//! their only contention point is the store itself.

pub mod arp_reply;
pub mod blacklist;
pub mod stats;
pub mod syn_flood;

pub use blacklist::{BlacklistAlert, BlacklistEngine, DetectionError};
pub use stats::{ReportSnapshot, StatStore};
