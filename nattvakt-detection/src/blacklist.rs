//! HTTP host blacklist detector.
//!
//! Scans the payload of TCP segments addressed to port 80 for an HTTP
//! `Host:` header naming a blacklisted site. The scan is a bounded
//! Aho-Corasick search over the captured payload slice only, and a
//! match must end at a line boundary so the host value is an exact
//! name, not a prefix of a longer one.

use std::fmt;
use std::net::Ipv4Addr;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use nattvakt_protocols::TcpSegment;
use thiserror::Error;

use crate::stats::StatStore;

/// Destination port the detector keys on.
pub const HTTP_PORT: u16 = 80;

/// Hostnames whose access raises a violation. Fixed at build time.
pub const BLACKLISTED_HOSTS: [&str; 2] = ["www.google.co.uk", "www.bbc.com"];

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Pattern compilation failed: {0}")]
    PatternError(String),
}

/// Alert record for one blacklist violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlacklistAlert {
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    pub host: &'static str,
}

impl fmt::Display for BlacklistAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "blacklisted host {} requested ({} -> {})",
            self.host, self.source, self.destination
        )
    }
}

/// Compiled matcher over the fixed blacklist.
pub struct BlacklistEngine {
    matcher: AhoCorasick,
}

impl BlacklistEngine {
    /// Compiles `Host: <name>` patterns for every blacklisted host.
    pub fn new() -> Result<Self, DetectionError> {
        let patterns: Vec<String> = BLACKLISTED_HOSTS
            .iter()
            .map(|host| format!("Host: {host}"))
            .collect();
        let matcher = AhoCorasickBuilder::new()
            .build(&patterns)
            .map_err(|e| DetectionError::PatternError(e.to_string()))?;
        Ok(Self { matcher })
    }

    /// Inspects one TCP segment; a violation increments the shared
    /// counter and yields an alert record for the logging collaborator.
    pub fn inspect(&self, segment: &TcpSegment<'_>, stats: &StatStore) -> Option<BlacklistAlert> {
        if segment.tcp.destination_port != HTTP_PORT {
            return None;
        }

        for found in self.matcher.find_iter(segment.payload) {
            if !ends_header_line(segment.payload, found.end()) {
                continue;
            }
            stats.record_blacklist_hit();
            return Some(BlacklistAlert {
                source: segment.ipv4.source,
                destination: segment.ipv4.destination,
                host: BLACKLISTED_HOSTS[found.pattern().as_usize()],
            });
        }
        None
    }
}

/// True when the matched `Host:` line ends at `end`: either the capture
/// stops there or a CR/LF follows. Rules out prefix matches like
/// `www.bbc.com.attacker.example`.
fn ends_header_line(payload: &[u8], end: usize) -> bool {
    end == payload.len() || payload[end] == b'\r' || payload[end] == b'\n'
}
