//! Captured frame type.

use bytes::Bytes;

/// One captured link-layer frame plus capture metadata.
///
/// The buffer holds exactly the captured bytes; `data.len()` is the
/// captured length and the on-wire length is kept separately since the
/// snapshot limit may have cut the frame short.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Capture timestamp in nanoseconds since the Unix epoch.
    pub timestamp_ns: u64,
    /// Original frame length on the wire.
    pub wire_len: u32,
    /// Captured bytes.
    pub data: Bytes,
}

impl Frame {
    pub fn new(timestamp_ns: u64, wire_len: u32, data: Vec<u8>) -> Self {
        Self {
            timestamp_ns,
            wire_len,
            data: Bytes::from(data),
        }
    }

    /// Number of bytes actually captured.
    pub fn captured_len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_len_tracks_buffer() {
        let frame = Frame::new(0, 1514, vec![0u8; 96]);
        assert_eq!(frame.captured_len(), 96);
        assert_eq!(frame.wire_len, 1514);
    }
}
