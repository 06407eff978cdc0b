//! IPv4 header decoding.

use std::fmt;
use std::net::Ipv4Addr;

use crate::error::{DecodeError, Layer};

/// Minimum IPv4 header length (IHL = 5).
pub const IPV4_MIN_HEADER_LEN: usize = 20;

/// IP protocol number for TCP.
pub const IP_PROTO_TCP: u8 = 6;

/// Decoded IPv4 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Header {
    pub version: u8,
    pub ihl: u8,
    pub tos: u8,
    pub total_length: u16,
    pub identification: u16,
    pub fragment_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub checksum: u16,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
}

impl Ipv4Header {
    /// Decodes the IPv4 header at the start of `data`.
    ///
    /// The declared header length (IHL x 4) is validated against the
    /// captured bytes so the transport layer never starts past the
    /// buffer end.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < IPV4_MIN_HEADER_LEN {
            return Err(DecodeError::truncated(
                Layer::Network,
                IPV4_MIN_HEADER_LEN,
                data.len(),
            ));
        }

        let version = data[0] >> 4;
        let ihl = data[0] & 0x0f;
        if ihl < 5 {
            return Err(DecodeError::malformed(
                Layer::Network,
                "IHL below minimum of 5 words",
            ));
        }

        let header_len = usize::from(ihl) * 4;
        if data.len() < header_len {
            return Err(DecodeError::truncated(Layer::Network, header_len, data.len()));
        }

        Ok(Self {
            version,
            ihl,
            tos: data[1],
            total_length: u16::from_be_bytes([data[2], data[3]]),
            identification: u16::from_be_bytes([data[4], data[5]]),
            fragment_offset: u16::from_be_bytes([data[6], data[7]]) & 0x1fff,
            ttl: data[8],
            protocol: data[9],
            checksum: u16::from_be_bytes([data[10], data[11]]),
            source: Ipv4Addr::new(data[12], data[13], data[14], data[15]),
            destination: Ipv4Addr::new(data[16], data[17], data[18], data[19]),
        })
    }

    /// Header length in bytes, derived from the IHL field.
    pub fn header_len(&self) -> usize {
        usize::from(self.ihl) * 4
    }

    pub fn is_tcp(&self) -> bool {
        self.protocol == IP_PROTO_TCP
    }
}

impl fmt::Display for Ipv4Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[IP header]")?;
        writeln!(f, "Version: {}", self.version)?;
        writeln!(f, "IHL: {}", self.ihl)?;
        writeln!(f, "TOS: {}", self.tos)?;
        writeln!(f, "Total Length: {}", self.total_length)?;
        writeln!(f, "Identification: {}", self.identification)?;
        writeln!(f, "Fragment Offset: {}", self.fragment_offset)?;
        writeln!(f, "Time To Live: {}", self.ttl)?;
        writeln!(f, "Protocol: {}", self.protocol)?;
        writeln!(f, "Header Checksum: {:#06x}", self.checksum)?;
        writeln!(f, "Source IP Address: {}", self.source)?;
        write!(f, "Destination IP Address: {}", self.destination)
    }
}
