//! SYN-flood detector.
//!
//! Keys on TCP segments whose only control flag is SYN, the
//! connection-exhaustion probe pattern. Any other flag combination is
//! ignored. Matching segments bump the SYN total and record the source
//! address exactly once per distinct source, even under concurrent
//! matches.

use nattvakt_protocols::TcpSegment;
use tracing::trace;

use crate::stats::StatStore;

/// Inspects one TCP segment for the bare-SYN pattern.
pub fn inspect(segment: &TcpSegment<'_>, stats: &StatStore) {
    if !segment.tcp.flags.is_bare_syn() {
        return;
    }

    let newly_seen = stats.record_syn(segment.ipv4.source);
    if newly_seen {
        trace!("new SYN source {}", segment.ipv4.source);
    }
}
