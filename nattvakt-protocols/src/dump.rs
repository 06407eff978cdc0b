//! Human-readable rendering of decoded headers.
//!
//! Side channel for operator inspection only; detection logic never
//! consults the rendered text.

use std::fmt::Write;

use crate::decode::DecodedFrame;

/// Renders every header of a decoded frame, one section per layer.
pub fn render_frame(frame: &DecodedFrame<'_>) -> String {
    let mut out = String::new();
    match frame {
        DecodedFrame::Arp { ethernet, arp } => {
            let _ = writeln!(out, "{}", ethernet);
            let _ = write!(out, "{}", arp);
        }
        DecodedFrame::Tcp(segment) => {
            let _ = writeln!(out, "{}", segment.ethernet);
            let _ = writeln!(out, "{}", segment.ipv4);
            let _ = write!(out, "{}", segment.tcp);
        }
        DecodedFrame::Ipv4 { ethernet, ipv4 } => {
            let _ = writeln!(out, "{}", ethernet);
            let _ = write!(out, "{}", ipv4);
        }
        DecodedFrame::Other { ethernet } => {
            let _ = write!(out, "{}", ethernet);
        }
    }
    out
}
