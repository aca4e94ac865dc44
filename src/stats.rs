//! Statistics tracking for the server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::dns::Rcode;

/// Atomic counters, reset on each snapshot.
pub struct Stats {
    started: Instant,
    pub requests: AtomicU64,
    pub answered: AtomicU64,
    pub dropped: AtomicU64,
    noerror: AtomicU64,
    nxdomain: AtomicU64,
    servfail: AtomicU64,
    refused: AtomicU64,
}

impl Stats {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            requests: AtomicU64::new(0),
            answered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            noerror: AtomicU64::new(0),
            nxdomain: AtomicU64::new(0),
            servfail: AtomicU64::new(0),
            refused: AtomicU64::new(0),
        }
    }

    pub fn record_answered(&self, rcode: Rcode) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.answered.fetch_add(1, Ordering::Relaxed);
        let counter = match rcode {
            Rcode::NoError => &self.noerror,
            Rcode::NxDomain => &self.nxdomain,
            Rcode::ServFail => &self.servfail,
            Rcode::Refused => &self.refused,
            Rcode::FormErr | Rcode::NotImp => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot_and_reset(&self) -> StatsSnapshot {
        StatsSnapshot {
            uptime_secs: self.started.elapsed().as_secs(),
            requests: self.requests.swap(0, Ordering::Relaxed),
            answered: self.answered.swap(0, Ordering::Relaxed),
            dropped: self.dropped.swap(0, Ordering::Relaxed),
            noerror: self.noerror.swap(0, Ordering::Relaxed),
            nxdomain: self.nxdomain.swap(0, Ordering::Relaxed),
            servfail: self.servfail.swap(0, Ordering::Relaxed),
            refused: self.refused.swap(0, Ordering::Relaxed),
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub uptime_secs: u64,
    pub requests: u64,
    pub answered: u64,
    pub dropped: u64,
    pub noerror: u64,
    pub nxdomain: u64,
    pub servfail: u64,
    pub refused: u64,
}
