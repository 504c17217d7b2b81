//! Point-in-time system metric records.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Everything a metrics source reports. The timestamp is added by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub total_users: u64,
    pub active_sessions: u64,
    pub admin_sessions: u64,
    pub cpu_usage: f64,    // percent, nominally 0.0..=100.0
    pub memory_usage: u64, // bytes
}

/// An immutable snapshot of system metrics.
///
/// Snapshots are replaced wholesale on refresh and never mutated in place.
/// `Default` is the all-zero snapshot with timestamp 0, which hosts can use
/// when no cache is available.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub total_users: u64,
    pub active_sessions: u64,
    pub admin_sessions: u64,
    pub cpu_usage: f64,
    pub memory_usage: u64,
    /// Unix seconds at which the snapshot was computed.
    pub timestamp: i64,
}

impl SystemSnapshot {
    /// Keys of the mapping handed to callers, in declaration order.
    pub const FIELDS: [&'static str; 6] = [
        "total_users",
        "active_sessions",
        "admin_sessions",
        "cpu_usage",
        "memory_usage",
        "timestamp",
    ];

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_metrics(metrics: Metrics, timestamp: i64) -> Self {
        Self {
            total_users: metrics.total_users,
            active_sessions: metrics.active_sessions,
            admin_sessions: metrics.admin_sessions,
            cpu_usage: metrics.cpu_usage,
            memory_usage: metrics.memory_usage,
            timestamp,
        }
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            total_users: self.total_users,
            active_sessions: self.active_sessions,
            admin_sessions: self.admin_sessions,
            cpu_usage: self.cpu_usage,
            memory_usage: self.memory_usage,
        }
    }

    /// Key-value form used across the host boundary.
    pub fn to_value(&self) -> Value {
        json!({
            "total_users": self.total_users,
            "active_sessions": self.active_sessions,
            "admin_sessions": self.admin_sessions,
            "cpu_usage": self.cpu_usage,
            "memory_usage": self.memory_usage,
            "timestamp": self.timestamp,
        })
    }
}
