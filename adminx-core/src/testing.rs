//! Deterministic clock and metrics sources for tests.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use crate::clock::Clock;
use crate::metrics::MetricsSource;
use crate::snapshot::Metrics;

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Counts collections and reports the running count as `total_users`.
#[derive(Debug, Default)]
pub struct CountingSource {
    calls: AtomicU64,
}

impl CountingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collections(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MetricsSource for CountingSource {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn collect(&self) -> Metrics {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Metrics {
            total_users: call,
            active_sessions: 2,
            admin_sessions: 1,
            cpu_usage: 12.5,
            memory_usage: 4096,
        }
    }
}
