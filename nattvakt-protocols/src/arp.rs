//! ARP message decoding (Ethernet/IPv4 layout).

use std::fmt;
use std::net::Ipv4Addr;

use crate::error::{DecodeError, Layer};
use crate::ethernet::format_mac;

/// Length of an ARP message with 6-byte hardware and 4-byte protocol
/// addresses, the only layout this decoder accepts.
pub const ARP_MESSAGE_LEN: usize = 28;

/// ARP operation code for a request.
pub const ARP_OP_REQUEST: u16 = 1;

/// ARP operation code for a reply.
pub const ARP_OP_REPLY: u16 = 2;

/// Decoded ARP message.
///
/// The operation code is normalized to host order during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpHeader {
    pub hardware_type: u16,
    pub protocol_type: u16,
    pub hardware_len: u8,
    pub protocol_len: u8,
    pub operation: u16,
    pub sender_hardware: [u8; 6],
    pub sender_protocol: Ipv4Addr,
    pub target_hardware: [u8; 6],
    pub target_protocol: Ipv4Addr,
}

impl ArpHeader {
    /// Decodes the ARP message at the start of `data` (the bytes
    /// immediately after the Ethernet header).
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < ARP_MESSAGE_LEN {
            return Err(DecodeError::truncated(
                Layer::Network,
                ARP_MESSAGE_LEN,
                data.len(),
            ));
        }

        let hardware_len = data[4];
        let protocol_len = data[5];
        if hardware_len != 6 || protocol_len != 4 {
            return Err(DecodeError::malformed(
                Layer::Network,
                "unsupported ARP address lengths",
            ));
        }

        let mut sender_hardware = [0u8; 6];
        sender_hardware.copy_from_slice(&data[8..14]);
        let mut target_hardware = [0u8; 6];
        target_hardware.copy_from_slice(&data[18..24]);

        Ok(Self {
            hardware_type: u16::from_be_bytes([data[0], data[1]]),
            protocol_type: u16::from_be_bytes([data[2], data[3]]),
            hardware_len,
            protocol_len,
            operation: u16::from_be_bytes([data[6], data[7]]),
            sender_hardware,
            sender_protocol: Ipv4Addr::new(data[14], data[15], data[16], data[17]),
            target_hardware,
            target_protocol: Ipv4Addr::new(data[24], data[25], data[26], data[27]),
        })
    }

    pub fn is_reply(&self) -> bool {
        self.operation == ARP_OP_REPLY
    }
}

impl fmt::Display for ArpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[ARP header]")?;
        writeln!(f, "Operation: {}", self.operation)?;
        writeln!(f, "Sender Hardware Address: {}", format_mac(&self.sender_hardware))?;
        writeln!(f, "Sender Protocol Address: {}", self.sender_protocol)?;
        writeln!(f, "Target Hardware Address: {}", format_mac(&self.target_hardware))?;
        write!(f, "Target Protocol Address: {}", self.target_protocol)
    }
}
