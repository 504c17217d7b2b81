mod args;

// Standard library
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

// External crates
use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::{debug, info};

// Internal imports
use adminx_core::hashing::HashAlgorithm;
use adminx_core::validation;
use adminx_core::{NativeOps, Operation, OpsConfig, MODULE_DESCRIPTION, MODULE_NAME};
use args::{Args, Command};

/// Exit code for a negative answer (unequal strings, rejected input).
const EXIT_NEGATIVE: u8 = 1;
/// Exit code for errors.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();

    // A second subscriber can only come from an embedding process; keep going
    let _ = adminx_logging::init_with_defaults("warn");

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = resolve_config(&args)?;
    info!(
        metrics = %config.metrics,
        stats_ttl_secs = config.stats_ttl_secs,
        "Using configuration"
    );
    let ops = NativeOps::from_config(&config);

    match args.command {
        Command::Stats {
            repeat,
            interval_ms,
        } => {
            for round in 0..repeat {
                if round > 0 {
                    thread::sleep(Duration::from_millis(interval_ms));
                }
                let snapshot = ops.get_system_stats();
                println!("{}", serde_json::to_string(&snapshot)?);
            }
            let counters = ops.cache().counters();
            debug!(hits = counters.hits, refreshes = counters.refreshes, "Stats cache counters");
            Ok(ExitCode::SUCCESS)
        }
        Command::Hash {
            password,
            salt,
            algorithm,
        } => {
            println!("{}", algorithm.digest(&password, &salt));
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate {
            input,
            min,
            max,
            explain,
        } => {
            let valid = if explain {
                match validation::explain_input(&input, min, max) {
                    Ok(()) => true,
                    Err(rejection) => {
                        println!("{}", rejection);
                        false
                    }
                }
            } else {
                let outcome = ops.validate_input_fast(&input, min, max);
                if !outcome.is_valid {
                    println!("{}", outcome.message);
                }
                outcome.is_valid
            };
            if valid {
                println!("✅ valid");
            }
            Ok(answer(valid))
        }
        Command::Compare { a, b } => {
            let equal = ops.fast_string_compare(&a, &b);
            println!("{}", equal);
            Ok(answer(equal))
        }
        Command::Call { operation, args } => {
            let values: Vec<Value> = args.iter().map(String::as_str).map(parse_call_arg).collect();
            let result = ops
                .call(&operation, &values)
                .with_context(|| format!("Calling {}", operation))?;
            println!("{}", serde_json::to_string(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::List => {
            println!("{} - {}", MODULE_NAME, MODULE_DESCRIPTION);
            for op in Operation::ALL {
                let signature = format!("{}({})", op.name(), op.params().join(", "));
                println!("  {:<48} {}", signature, op.description());
            }
            println!();
            println!("⚠️  fast_hash_password is a {} placeholder, not a credential hash.", HashAlgorithm::Djb2);
            println!("   Use `adminx hash --algorithm {}` for a stronger digest.", HashAlgorithm::Sha256);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load the config file if given, then apply flag overrides.
fn resolve_config(args: &Args) -> Result<OpsConfig> {
    let mut config = match &args.config {
        Some(path) => OpsConfig::load(path)
            .with_context(|| format!("Loading configuration from {}", path.display()))?,
        None => OpsConfig::default(),
    };

    if let Some(ttl) = args.ttl_secs {
        config.stats_ttl_secs = ttl;
    }
    if let Some(metrics) = args.metrics {
        config.metrics = metrics;
    }

    Ok(config)
}

/// Arguments are JSON literals; anything that does not parse is a string.
fn parse_call_arg(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn answer(positive: bool) -> ExitCode {
    if positive {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_NEGATIVE)
    }
}
