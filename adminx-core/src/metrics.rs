//! Metric sources behind the stats cache refresh seam.
//!
//! A source reports everything in a [`SystemSnapshot`](crate::SystemSnapshot)
//! except the timestamp. Sources are total: when a metric cannot be read it is
//! reported as zero rather than failing.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use sysinfo::{System, Users};
use tracing::debug;

use crate::error::OpsError;
use crate::snapshot::Metrics;

/// Refresh seam for [`StatsCache`](crate::StatsCache).
pub trait MetricsSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Gather a complete set of metrics. Never fails.
    fn collect(&self) -> Metrics;
}

/// Reports all-zero metrics.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderSource;

impl MetricsSource for PlaceholderSource {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    fn collect(&self) -> Metrics {
        Metrics::default()
    }
}

/// Reads CPU, memory and OS user counts through `sysinfo`.
///
/// The `System` handle is kept between calls because CPU usage is computed
/// from the delta of two refreshes; the first collection after construction
/// may therefore report 0%. Session counts are always zero since no session
/// store is attached.
pub struct SysinfoSource {
    system: Mutex<System>,
}

impl SysinfoSource {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu();
        system.refresh_memory();
        Self {
            system: Mutex::new(system),
        }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for SysinfoSource {
    fn name(&self) -> &'static str {
        "sysinfo"
    }

    fn collect(&self) -> Metrics {
        let mut system = self.system.lock().unwrap_or_else(PoisonError::into_inner);
        system.refresh_cpu();
        system.refresh_memory();

        let cpu_usage = sanitize_percent(f64::from(system.global_cpu_info().cpu_usage()));
        let memory_usage = system.used_memory();
        let total_users = Users::new_with_refreshed_list().list().len() as u64;

        debug!(cpu_usage, memory_usage, total_users, "Collected system metrics");

        Metrics {
            total_users,
            active_sessions: 0,
            admin_sessions: 0,
            cpu_usage,
            memory_usage,
        }
    }
}

/// Clamp a percentage into 0..=100, mapping NaN to 0.
fn sanitize_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Which metrics source to build, as named in configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsBackend {
    #[default]
    Placeholder,
    System,
}

impl MetricsBackend {
    pub fn build(self) -> Arc<dyn MetricsSource> {
        match self {
            MetricsBackend::Placeholder => Arc::new(PlaceholderSource),
            MetricsBackend::System => Arc::new(SysinfoSource::new()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetricsBackend::Placeholder => "placeholder",
            MetricsBackend::System => "system",
        }
    }
}

impl fmt::Display for MetricsBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricsBackend {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "placeholder" | "none" => Ok(MetricsBackend::Placeholder),
            "system" | "sysinfo" => Ok(MetricsBackend::System),
            other => Err(OpsError::Config(format!(
                "unknown metrics backend '{}' (expected 'placeholder' or 'system')",
                other
            ))),
        }
    }
}
