//! Settings for building an operation table.
//!
//! The defaults reproduce the reference behaviour (5 second TTL, zeroed
//! metrics). Front ends may load overrides from YAML:
//!
//! ```yaml
//! stats_ttl_secs: 10
//! metrics: system
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_STATS_TTL;
use crate::error::{OpsError, Result};
use crate::metrics::MetricsBackend;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpsConfig {
    /// Seconds a stats snapshot is served before it is recomputed.
    pub stats_ttl_secs: u64,
    pub metrics: MetricsBackend,
}

impl Default for OpsConfig {
    fn default() -> Self {
        Self {
            stats_ttl_secs: DEFAULT_STATS_TTL.as_secs(),
            metrics: MetricsBackend::default(),
        }
    }
}

impl OpsConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(content)
            .map_err(|e| OpsError::Config(format!("invalid configuration: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            OpsError::Config(msg) => OpsError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn stats_ttl(&self) -> Duration {
        Duration::from_secs(self.stats_ttl_secs)
    }
}
