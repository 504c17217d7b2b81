//! Cached system statistics and the native admin operation table.
//!
//! The crate is host-agnostic: bindings (Python, CLI) build a [`NativeOps`]
//! once and route calls into it.

pub mod cache;
pub mod clock;
pub mod compare;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod hashing;
pub mod metrics;
pub mod snapshot;
pub mod validation;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use cache::{CacheCounters, StatsCache, DEFAULT_STATS_TTL};
pub use clock::{Clock, SystemClock};
pub use config::OpsConfig;
pub use dispatch::{NativeOps, Operation, MODULE_DESCRIPTION, MODULE_NAME};
pub use error::{OpsError, Result};
pub use metrics::{MetricsBackend, MetricsSource, PlaceholderSource, SysinfoSource};
pub use snapshot::{Metrics, SystemSnapshot};
pub use validation::ValidationOutcome;
