//! ARP cache-poisoning detector.
//!
//! Counts every ARP reply on the segment. This is deliberately a
//! coarse signal: replies are not correlated with known hardware or
//! protocol address bindings, so legitimate replies count too. Treat
//! the total as an indicator to investigate, not confirmed poisoning.

use nattvakt_protocols::ArpHeader;
use tracing::trace;

use crate::stats::StatStore;

/// Inspects one ARP message; replies (operation 2) are counted.
pub fn inspect(arp: &ArpHeader, stats: &StatStore) {
    if !arp.is_reply() {
        return;
    }

    trace!(
        "ARP reply: {} is-at {:02x?}",
        arp.sender_protocol,
        arp.sender_hardware
    );
    stats.record_arp_reply();
}
