//! Ethernet II header decoding.

use std::fmt;

use crate::error::{DecodeError, Layer};

/// Fixed length of an Ethernet II header.
pub const ETHERNET_HEADER_LEN: usize = 14;

/// Ethertype value identifying an IPv4 payload.
pub const ETHERTYPE_IPV4: u16 = 0x0800;

/// Ethertype value identifying an ARP message.
pub const ETHERTYPE_ARP: u16 = 0x0806;

/// Decoded Ethernet II header.
///
/// The ethertype is normalized to host order during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    pub destination: [u8; 6],
    pub source: [u8; 6],
    pub ethertype: u16,
}

impl EthernetHeader {
    /// Decodes the Ethernet header at the start of `data`.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < ETHERNET_HEADER_LEN {
            return Err(DecodeError::truncated(
                Layer::Link,
                ETHERNET_HEADER_LEN,
                data.len(),
            ));
        }

        let mut destination = [0u8; 6];
        destination.copy_from_slice(&data[0..6]);
        let mut source = [0u8; 6];
        source.copy_from_slice(&data[6..12]);
        let ethertype = u16::from_be_bytes([data[12], data[13]]);

        Ok(Self {
            destination,
            source,
            ethertype,
        })
    }

    pub fn is_arp(&self) -> bool {
        self.ethertype == ETHERTYPE_ARP
    }

    pub fn is_ipv4(&self) -> bool {
        self.ethertype == ETHERTYPE_IPV4
    }
}

/// Formats a hardware address as `aa:bb:cc:dd:ee:ff`.
pub fn format_mac(mac: &[u8; 6]) -> String {
    mac.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

impl fmt::Display for EthernetHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Ethernet header]")?;
        writeln!(f, "Source MAC: {}", format_mac(&self.source))?;
        writeln!(f, "Destination MAC: {}", format_mac(&self.destination))?;
        write!(f, "Type: {:#06x}", self.ethertype)
    }
}
