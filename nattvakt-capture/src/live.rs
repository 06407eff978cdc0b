//! Live capture loop on a pcap device.

use std::sync::atomic::{AtomicBool, Ordering};

use pcap::{Capture, Device};
use thiserror::Error;
use tracing::{info, warn};

use crate::frame::Frame;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to list capture devices: {0}")]
    DeviceList(#[source] pcap::Error),
    #[error("capture device '{0}' not found")]
    DeviceNotFound(String),
    #[error("failed to open capture on '{interface}': {source}")]
    Open {
        interface: String,
        #[source]
        source: pcap::Error,
    },
    #[error("capture failed: {0}")]
    Capture(#[source] pcap::Error),
}

/// Runs a live capture loop on the specified interface.
///
/// Blocks until `terminate` is set. Each captured frame is passed to
/// `callback` exactly once; the callback must not block, the capture
/// loop owns the only capture handle.
pub fn run_capture_loop<F>(
    interface: &str,
    snaplen: usize,
    promiscuous: bool,
    terminate: &AtomicBool,
    mut callback: F,
) -> Result<(), CaptureError>
where
    F: FnMut(Frame) + Send,
{
    let device = Device::list()
        .map_err(CaptureError::DeviceList)?
        .into_iter()
        .find(|d| d.name == interface)
        .ok_or_else(|| CaptureError::DeviceNotFound(interface.to_string()))?;

    let mut cap = Capture::from_device(device)
        .and_then(|c| {
            c.promisc(promiscuous)
                .snaplen(snaplen as i32)
                .timeout(1000) // ms; lets the loop observe the terminate flag
                .open()
        })
        .map_err(|source| CaptureError::Open {
            interface: interface.to_string(),
            source,
        })?;

    info!("opened {interface} for capture");

    while !terminate.load(Ordering::Relaxed) {
        match cap.next_packet() {
            Ok(packet) => {
                let timestamp_ns = packet.header.ts.tv_sec as u64 * 1_000_000_000
                    + packet.header.ts.tv_usec as u64 * 1_000;
                callback(Frame::new(
                    timestamp_ns,
                    packet.header.len,
                    packet.data.to_vec(),
                ));
            }
            Err(pcap::Error::TimeoutExpired) => {
                // No packet in this timeout window; re-check the flag.
                continue;
            }
            Err(e) => {
                warn!("capture loop stopping: {e}");
                return Err(CaptureError::Capture(e));
            }
        }
    }

    info!("capture loop terminated");
    Ok(())
}
