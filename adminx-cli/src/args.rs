use std::path::PathBuf;

use adminx_core::hashing::HashAlgorithm;
use adminx_core::MetricsBackend;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "adminx")]
#[command(about = "Cached system statistics and native admin operations")]
#[command(version)]
pub struct Args {
    /// YAML configuration file (stats_ttl_secs, metrics)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seconds a stats snapshot is served before it is recomputed
    #[arg(long, global = true)]
    pub ttl_secs: Option<u64>,

    /// Metrics source: placeholder or system
    #[arg(long, global = true)]
    pub metrics: Option<MetricsBackend>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print cached system statistics as JSON
    Stats {
        /// Number of snapshots to print
        #[arg(long, default_value_t = 1)]
        repeat: u32,
        /// Delay between snapshots in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
    /// Hash a password with a salt
    Hash {
        password: String,
        salt: String,
        /// Digest algorithm: djb2 (placeholder) or sha256
        #[arg(long, default_value = "djb2")]
        algorithm: HashAlgorithm,
    },
    /// Check an input for length and dangerous characters
    Validate {
        #[arg(allow_hyphen_values = true)]
        input: String,
        /// Minimum length in characters
        #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
        min: i64,
        /// Maximum length in characters
        #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
        max: i64,
        /// Name the rule that rejected the input
        #[arg(long)]
        explain: bool,
    },
    /// Compare two strings position by position
    Compare {
        #[arg(allow_hyphen_values = true)]
        a: String,
        #[arg(allow_hyphen_values = true)]
        b: String,
    },
    /// Invoke an operation by name; arguments are JSON literals
    Call {
        /// Operation name (see `adminx list`)
        operation: String,
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List the operation table
    List,
}
