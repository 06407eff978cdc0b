//! Composed frame decoding: link layer first, then network, then
//! transport, each boundary derived from the previous header's declared
//! length and checked against the captured bytes.

use crate::arp::ArpHeader;
use crate::error::DecodeError;
use crate::ethernet::{EthernetHeader, ETHERNET_HEADER_LEN};
use crate::ipv4::Ipv4Header;
use crate::tcp::TcpHeader;

/// A fully decoded TCP segment with its bounded payload slice.
///
/// The payload borrows from the captured frame buffer and covers exactly
/// `captured_len - (link + network + transport header lengths)` bytes, so
/// scans over it can never run past the capture.
#[derive(Debug, Clone, Copy)]
pub struct TcpSegment<'a> {
    pub ethernet: EthernetHeader,
    pub ipv4: Ipv4Header,
    pub tcp: TcpHeader,
    pub payload: &'a [u8],
}

/// Result of decoding one captured frame.
#[derive(Debug, Clone, Copy)]
pub enum DecodedFrame<'a> {
    /// ARP message.
    Arp {
        ethernet: EthernetHeader,
        arp: ArpHeader,
    },
    /// IPv4 TCP segment.
    Tcp(TcpSegment<'a>),
    /// IPv4 datagram carrying something other than TCP.
    Ipv4 {
        ethernet: EthernetHeader,
        ipv4: Ipv4Header,
    },
    /// Anything with an ethertype the detectors do not inspect.
    Other { ethernet: EthernetHeader },
}

/// Decodes a captured frame into the header views the detectors consume.
///
/// Fails with [`DecodeError`] if the frame is shorter than any header's
/// declared length; callers drop such frames without side effects.
pub fn decode(data: &[u8]) -> Result<DecodedFrame<'_>, DecodeError> {
    let ethernet = EthernetHeader::decode(data)?;
    let after_link = &data[ETHERNET_HEADER_LEN..];

    if ethernet.is_arp() {
        let arp = ArpHeader::decode(after_link)?;
        return Ok(DecodedFrame::Arp { ethernet, arp });
    }

    if !ethernet.is_ipv4() {
        return Ok(DecodedFrame::Other { ethernet });
    }

    let ipv4 = Ipv4Header::decode(after_link)?;
    if !ipv4.is_tcp() {
        return Ok(DecodedFrame::Ipv4 { ethernet, ipv4 });
    }

    let after_network = &after_link[ipv4.header_len()..];
    let tcp = TcpHeader::decode(after_network)?;
    let payload = &after_network[tcp.header_len()..];

    Ok(DecodedFrame::Tcp(TcpSegment {
        ethernet,
        ipv4,
        tcp,
        payload,
    }))
}

#[cfg(test)]
pub mod testutil {
    //! Synthetic frame builders shared by the decoder tests; the
    //! detection crate builds its own fixtures the same way.

    use crate::arp::ARP_MESSAGE_LEN;
    use crate::ethernet::{ETHERNET_HEADER_LEN, ETHERTYPE_ARP, ETHERTYPE_IPV4};
    use crate::ipv4::IP_PROTO_TCP;

    pub fn ethernet(ethertype: u16) -> Vec<u8> {
        let mut frame = Vec::with_capacity(ETHERNET_HEADER_LEN);
        frame.extend_from_slice(&[0xff; 6]);
        frame.extend_from_slice(&[0x02, 0, 0, 0, 0, 0x01]);
        frame.extend_from_slice(&ethertype.to_be_bytes());
        frame
    }

    pub fn tcp_frame(
        source: [u8; 4],
        destination: [u8; 4],
        destination_port: u16,
        flag_byte: u8,
        payload: &[u8],
    ) -> Vec<u8> {
        let mut frame = ethernet(ETHERTYPE_IPV4);

        let mut ip = vec![0u8; 20];
        ip[0] = 0x45;
        ip[8] = 64;
        ip[9] = IP_PROTO_TCP;
        ip[12..16].copy_from_slice(&source);
        ip[16..20].copy_from_slice(&destination);
        frame.extend_from_slice(&ip);

        let mut tcp = vec![0u8; 20];
        tcp[0..2].copy_from_slice(&49152u16.to_be_bytes());
        tcp[2..4].copy_from_slice(&destination_port.to_be_bytes());
        tcp[12] = 0x50;
        tcp[13] = flag_byte;
        frame.extend_from_slice(&tcp);

        frame.extend_from_slice(payload);
        frame
    }

    pub fn arp_frame(operation: u16) -> Vec<u8> {
        let mut frame = ethernet(ETHERTYPE_ARP);
        let mut arp = vec![0u8; ARP_MESSAGE_LEN];
        arp[0..2].copy_from_slice(&1u16.to_be_bytes());
        arp[2..4].copy_from_slice(&0x0800u16.to_be_bytes());
        arp[4] = 6;
        arp[5] = 4;
        arp[6..8].copy_from_slice(&operation.to_be_bytes());
        arp[14..18].copy_from_slice(&[192, 168, 1, 10]);
        arp[24..28].copy_from_slice(&[192, 168, 1, 1]);
        frame.extend_from_slice(&arp);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::testutil::{arp_frame, ethernet, tcp_frame};
    use super::*;
    use crate::arp::ARP_OP_REPLY;
    use crate::error::Layer;
    use proptest::prelude::*;

    #[test]
    fn decodes_tcp_segment_with_payload() {
        let frame = tcp_frame([10, 0, 0, 1], [10, 0, 0, 2], 80, 0x02, b"GET / HTTP/1.1");
        match decode(&frame).unwrap() {
            DecodedFrame::Tcp(segment) => {
                assert_eq!(segment.tcp.destination_port, 80);
                assert_eq!(segment.payload, b"GET / HTTP/1.1");
            }
            other => panic!("expected TCP segment, got {:?}", other),
        }
    }

    #[test]
    fn decodes_arp_reply() {
        let frame = arp_frame(ARP_OP_REPLY);
        match decode(&frame).unwrap() {
            DecodedFrame::Arp { arp, .. } => assert!(arp.is_reply()),
            other => panic!("expected ARP, got {:?}", other),
        }
    }

    #[test]
    fn non_ip_ethertype_is_passed_through() {
        let frame = ethernet(0x86dd); // IPv6, out of scope
        assert!(matches!(
            decode(&frame),
            Ok(DecodedFrame::Other { .. })
        ));
    }

    #[test]
    fn truncated_below_link_minimum() {
        assert!(matches!(
            decode(&[0u8; 10]),
            Err(DecodeError::TruncatedFrame {
                layer: Layer::Link,
                ..
            })
        ));
    }

    #[test]
    fn truncated_inside_network_header() {
        let mut frame = tcp_frame([10, 0, 0, 1], [10, 0, 0, 2], 80, 0x02, &[]);
        frame.truncate(ETHERNET_HEADER_LEN + 10);
        assert!(matches!(
            decode(&frame),
            Err(DecodeError::TruncatedFrame {
                layer: Layer::Network,
                ..
            })
        ));
    }

    #[test]
    fn truncated_inside_transport_header() {
        let mut frame = tcp_frame([10, 0, 0, 1], [10, 0, 0, 2], 80, 0x02, &[]);
        frame.truncate(ETHERNET_HEADER_LEN + 20 + 12);
        assert!(matches!(
            decode(&frame),
            Err(DecodeError::TruncatedFrame {
                layer: Layer::Transport,
                ..
            })
        ));
    }

    #[test]
    fn payload_is_bounded_by_capture() {
        // No terminator anywhere in the payload; the slice must still end
        // exactly at the captured length.
        let payload = [b'x'; 32];
        let frame = tcp_frame([10, 0, 0, 1], [10, 0, 0, 2], 80, 0x18, &payload);
        match decode(&frame).unwrap() {
            DecodedFrame::Tcp(segment) => {
                assert_eq!(segment.payload.len(), 32);
                let end = segment.payload.as_ptr() as usize + segment.payload.len();
                assert_eq!(end, frame.as_ptr() as usize + frame.len());
            }
            other => panic!("expected TCP segment, got {:?}", other),
        }
    }

    proptest! {
        /// Arbitrary input never panics and never yields a view past the
        /// captured buffer.
        #[test]
        fn decode_never_reads_past_capture(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            if let Ok(DecodedFrame::Tcp(segment)) = decode(&data) {
                let start = data.as_ptr() as usize;
                let payload_end = segment.payload.as_ptr() as usize + segment.payload.len();
                prop_assert!(payload_end <= start + data.len());
            }
        }

        /// Frames shorter than the link header minimum always fail.
        #[test]
        fn short_frames_always_truncated(data in proptest::collection::vec(any::<u8>(), 0..14)) {
            prop_assert!(matches!(
                decode(&data),
                Err(DecodeError::TruncatedFrame { layer: Layer::Link, .. })
            ), "expected TruncatedFrame at link layer");
        }
    }
}
