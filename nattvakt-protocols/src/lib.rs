//! # Nattvakt Protocol Decoders
//!
//! Bounds-checked decoders for the headers the detection engine needs:
//! Ethernet, ARP, IPv4 and TCP. Every offset is validated against the
//! captured length before a view is produced; no other crate touches
//! raw frame bytes.

pub mod arp;
pub mod decode;
pub mod dump;
pub mod error;
pub mod ethernet;
pub mod ipv4;
pub mod tcp;

pub use arp::ArpHeader;
pub use decode::{decode, DecodedFrame, TcpSegment};
pub use error::{DecodeError, Layer};
pub use ethernet::EthernetHeader;
pub use ipv4::Ipv4Header;
pub use tcp::{TcpFlags, TcpHeader};
