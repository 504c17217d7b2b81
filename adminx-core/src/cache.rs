//! Time-based cache for system snapshots.
//!
//! Holds a single snapshot and serves it until it is older than the TTL,
//! then asks the metrics source for a fresh one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, instrument};

use crate::metrics::MetricsSource;
use crate::snapshot::SystemSnapshot;

/// How long a snapshot is served before it is recomputed.
pub const DEFAULT_STATS_TTL: Duration = Duration::from_secs(5);

/// Single-slot snapshot cache.
///
/// The whole check-refresh-store sequence runs under one lock, so concurrent
/// callers never observe a half-replaced snapshot and a stale window is
/// refreshed exactly once.
pub struct StatsCache {
    source: Arc<dyn MetricsSource>,
    /// Each snapshot is stamped with the clock value of its refresh.
    state: Mutex<Option<SystemSnapshot>>,
    hits: AtomicU64,
    refreshes: AtomicU64,
}

impl StatsCache {
    pub fn new(source: Arc<dyn MetricsSource>) -> Self {
        Self {
            source,
            state: Mutex::new(None),
            hits: AtomicU64::new(0),
            refreshes: AtomicU64::new(0),
        }
    }

    /// Return the held snapshot if it is younger than `ttl`, otherwise
    /// refresh it, stamping the new snapshot with `now`.
    ///
    /// A clock that moved backwards past the last refresh still counts as
    /// fresh, so polling callers never see the timestamp go down.
    #[instrument(skip(self), fields(source = self.source.name()))]
    pub fn get(&self, now: i64, ttl: Duration) -> SystemSnapshot {
        let mut state = self.lock_state();

        if let Some(snapshot) = *state {
            if is_fresh(now, snapshot.timestamp, ttl) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(timestamp = snapshot.timestamp, "Serving cached snapshot");
                return snapshot;
            }
        }

        let snapshot = SystemSnapshot::from_metrics(self.source.collect(), now);
        *state = Some(snapshot);
        self.refreshes.fetch_add(1, Ordering::Relaxed);
        debug!(timestamp = now, "Refreshed snapshot");

        snapshot
    }

    /// The held snapshot, without refreshing.
    pub fn peek(&self) -> Option<SystemSnapshot> {
        *self.lock_state()
    }

    /// Clock value of the last refresh, `None` until a snapshot is held.
    ///
    /// A refresh at clock value 0 reads as `Some(0)`.
    pub fn last_refresh(&self) -> Option<i64> {
        let held = *self.lock_state();
        held.map(|snapshot| snapshot.timestamp)
    }

    /// Drop the held snapshot so the next `get` refreshes.
    pub fn invalidate(&self) {
        debug!("Invalidating stats cache");
        *self.lock_state() = None;
    }

    /// Get cache statistics (for debugging/monitoring)
    pub fn counters(&self) -> CacheCounters {
        CacheCounters {
            hits: self.hits.load(Ordering::Relaxed),
            refreshes: self.refreshes.load(Ordering::Relaxed),
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    // Snapshots are Copy and swapped in one assignment, so a poisoned lock
    // still guards a consistent state.
    fn lock_state(&self) -> MutexGuard<'_, Option<SystemSnapshot>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `now - last_refresh < ttl`, where a negative age is always fresh.
fn is_fresh(now: i64, last_refresh: i64, ttl: Duration) -> bool {
    if now < last_refresh {
        return true;
    }
    Duration::from_secs(now.abs_diff(last_refresh)) < ttl
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheCounters {
    pub hits: u64,
    pub refreshes: u64,
}
