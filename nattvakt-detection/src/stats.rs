//! Shared counter store.
//!
//! Process-wide detection state: created once at startup, mutated by
//! concurrent analysis tasks, read once at termination for the report.
//! The SYN total and the distinct-source set form a single exclusion
//! domain so membership test and insert are one indivisible operation;
//! the other counters are independent atomics. No caller ever holds
//! more than one domain at a time.

use std::collections::HashSet;
use std::fmt;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::warn;

#[derive(Debug, Default)]
struct SynFloodState {
    total: u64,
    sources: HashSet<Ipv4Addr>,
}

/// Shared mutable aggregates for all three detectors.
#[derive(Debug, Default)]
pub struct StatStore {
    syn: Mutex<SynFloodState>,
    arp_replies: AtomicU64,
    blacklist_hits: AtomicU64,
}

impl StatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one bare-SYN observation from `source`.
    ///
    /// Increments the SYN total and inserts the source address if it
    /// has not been seen before, under a single lock acquisition.
    /// Returns true when the source was newly recorded.
    ///
    /// If the set cannot grow, the raw SYN count still stands; the
    /// address is skipped and the condition logged.
    pub fn record_syn(&self, source: Ipv4Addr) -> bool {
        let mut state = self.syn.lock();
        state.total += 1;
        if state.sources.contains(&source) {
            return false;
        }
        if let Err(e) = state.sources.try_reserve(1) {
            warn!("SYN source set cannot grow, skipping {source}: {e}");
            return false;
        }
        state.sources.insert(source)
    }

    /// Counts one observed ARP reply.
    pub fn record_arp_reply(&self) {
        self.arp_replies.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one blacklist violation.
    pub fn record_blacklist_hit(&self) {
        self.blacklist_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time snapshot of all counters.
    ///
    /// May race benignly with ongoing increments; each counter is an
    /// order-independent sum, which is all the termination report needs.
    pub fn snapshot(&self) -> ReportSnapshot {
        let syn = self.syn.lock();
        ReportSnapshot {
            syn_total: syn.total,
            distinct_syn_sources: syn.sources.len() as u64,
            arp_reply_total: self.arp_replies.load(Ordering::Relaxed),
            blacklist_total: self.blacklist_hits.load(Ordering::Relaxed),
        }
    }
}

/// Counter values handed to the reporting collaborator at shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSnapshot {
    pub syn_total: u64,
    pub distinct_syn_sources: u64,
    pub arp_reply_total: u64,
    pub blacklist_total: u64,
}

impl fmt::Display for ReportSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Intrusion Detection Report:")?;
        writeln!(
            f,
            "{} SYN packets detected from {} different IPs (syn attack)",
            self.syn_total, self.distinct_syn_sources
        )?;
        writeln!(f, "{} ARP responses (cache poisoning)", self.arp_reply_total)?;
        write!(f, "{} URL Blacklist violations", self.blacklist_total)
    }
}
