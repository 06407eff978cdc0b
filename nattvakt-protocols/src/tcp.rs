//! TCP header decoding.

use std::fmt;

use crate::error::{DecodeError, Layer};

/// Minimum TCP header length (data offset = 5).
pub const TCP_MIN_HEADER_LEN: usize = 20;

/// TCP control flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TcpFlags {
    pub urg: bool,
    pub ack: bool,
    pub psh: bool,
    pub rst: bool,
    pub syn: bool,
    pub fin: bool,
}

impl TcpFlags {
    fn from_byte(byte: u8) -> Self {
        Self {
            fin: byte & 0x01 != 0,
            syn: byte & 0x02 != 0,
            rst: byte & 0x04 != 0,
            psh: byte & 0x08 != 0,
            ack: byte & 0x10 != 0,
            urg: byte & 0x20 != 0,
        }
    }

    /// True when SYN is the only flag set: the connection-open probe
    /// pattern the SYN-flood detector keys on.
    pub fn is_bare_syn(&self) -> bool {
        self.syn && !self.ack && !self.urg && !self.psh && !self.rst && !self.fin
    }
}

/// Decoded TCP header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TcpHeader {
    pub source_port: u16,
    pub destination_port: u16,
    pub sequence: u32,
    pub acknowledgment: u32,
    pub data_offset: u8,
    pub flags: TcpFlags,
}

impl TcpHeader {
    /// Decodes the TCP header at the start of `data`.
    ///
    /// The declared data offset (words x 4) is validated against the
    /// captured bytes so the payload never starts past the buffer end.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < TCP_MIN_HEADER_LEN {
            return Err(DecodeError::truncated(
                Layer::Transport,
                TCP_MIN_HEADER_LEN,
                data.len(),
            ));
        }

        let data_offset = data[12] >> 4;
        if data_offset < 5 {
            return Err(DecodeError::malformed(
                Layer::Transport,
                "data offset below minimum of 5 words",
            ));
        }

        let header_len = usize::from(data_offset) * 4;
        if data.len() < header_len {
            return Err(DecodeError::truncated(
                Layer::Transport,
                header_len,
                data.len(),
            ));
        }

        Ok(Self {
            source_port: u16::from_be_bytes([data[0], data[1]]),
            destination_port: u16::from_be_bytes([data[2], data[3]]),
            sequence: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            acknowledgment: u32::from_be_bytes([data[8], data[9], data[10], data[11]]),
            data_offset,
            flags: TcpFlags::from_byte(data[13]),
        })
    }

    /// Header length in bytes, derived from the data offset field.
    pub fn header_len(&self) -> usize {
        usize::from(self.data_offset) * 4
    }
}

impl fmt::Display for TcpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[TCP header]")?;
        writeln!(f, "Source port: {}", self.source_port)?;
        writeln!(f, "Destination port: {}", self.destination_port)?;
        writeln!(f, "Sequence number: {}", self.sequence)?;
        writeln!(f, "Acknowledgment number: {}", self.acknowledgment)?;
        writeln!(f, "DO: {}", self.data_offset)?;
        writeln!(f, "URG: {}", u8::from(self.flags.urg))?;
        writeln!(f, "ACK: {}", u8::from(self.flags.ack))?;
        writeln!(f, "PSH: {}", u8::from(self.flags.psh))?;
        writeln!(f, "RST: {}", u8::from(self.flags.rst))?;
        writeln!(f, "SYN: {}", u8::from(self.flags.syn))?;
        write!(f, "FIN: {}", u8::from(self.flags.fin))
    }
}
