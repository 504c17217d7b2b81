//! The native operation table.
//!
//! [`NativeOps`] owns the stats cache and exposes exactly four operations.
//! Hosts either call the typed methods directly (the Python binding does) or
//! go through [`NativeOps::call`], which marshals arguments from JSON values
//! and reports malformed calls as [`OpsError::Argument`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::cache::StatsCache;
use crate::clock::{Clock, SystemClock};
use crate::compare;
use crate::config::OpsConfig;
use crate::error::{OpsError, Result};
use crate::hashing;
use crate::snapshot::SystemSnapshot;
use crate::validation::{self, ValidationOutcome};

/// Name under which the table is registered with a host runtime.
pub const MODULE_NAME: &str = "admin_extension";

/// Human-readable description of the table.
pub const MODULE_DESCRIPTION: &str =
    "Admin extension: cached system statistics and fast input helpers";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetSystemStats,
    FastHashPassword,
    ValidateInputFast,
    FastStringCompare,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::GetSystemStats,
        Operation::FastHashPassword,
        Operation::ValidateInputFast,
        Operation::FastStringCompare,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::GetSystemStats => "get_system_stats",
            Operation::FastHashPassword => "fast_hash_password",
            Operation::ValidateInputFast => "validate_input_fast",
            Operation::FastStringCompare => "fast_string_compare",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::GetSystemStats => "Get system statistics (cached)",
            Operation::FastHashPassword => "Fast password hashing",
            Operation::ValidateInputFast => "Fast input validation",
            Operation::FastStringCompare => "Timing-safe string comparison",
        }
    }

    /// Parameter names, in call order.
    pub fn params(self) -> &'static [&'static str] {
        match self {
            Operation::GetSystemStats => &[],
            Operation::FastHashPassword => &["password", "salt"],
            Operation::ValidateInputFast => &["input", "min_len", "max_len"],
            Operation::FastStringCompare => &["a", "b"],
        }
    }

    pub fn arity(self) -> usize {
        self.params().len()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = OpsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| OpsError::UnknownOperation(s.to_string()))
    }
}

/// The four-operation table plus the cache it serves stats from.
pub struct NativeOps {
    cache: StatsCache,
    clock: Arc<dyn Clock>,
    stats_ttl: Duration,
}

impl NativeOps {
    pub fn new(cache: StatsCache, clock: Arc<dyn Clock>, stats_ttl: Duration) -> Self {
        Self {
            cache,
            clock,
            stats_ttl,
        }
    }

    /// Build a table with the real clock and the configured metrics source.
    pub fn from_config(config: &OpsConfig) -> Self {
        debug!(
            metrics = %config.metrics,
            stats_ttl_secs = config.stats_ttl_secs,
            "Building operation table"
        );
        Self::new(
            StatsCache::new(config.metrics.build()),
            Arc::new(SystemClock),
            config.stats_ttl(),
        )
    }

    pub fn cache(&self) -> &StatsCache {
        &self.cache
    }

    pub fn stats_ttl(&self) -> Duration {
        self.stats_ttl
    }

    pub fn get_system_stats(&self) -> SystemSnapshot {
        self.cache.get(self.clock.now(), self.stats_ttl)
    }

    pub fn fast_hash_password(&self, password: &str, salt: &str) -> String {
        hashing::fast_hash_password(password, salt)
    }

    pub fn validate_input_fast(&self, input: &str, min_len: i64, max_len: i64) -> ValidationOutcome {
        validation::validate_input_fast(input, min_len, max_len)
    }

    pub fn fast_string_compare(&self, a: &str, b: &str) -> bool {
        compare::fast_string_compare(a, b)
    }

    /// Invoke an operation by name with host values as arguments.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let operation: Operation = name.parse()?;
        self.invoke(operation, args)
    }

    #[instrument(skip(self, args), fields(operation = %operation, argc = args.len()))]
    pub fn invoke(&self, operation: Operation, args: &[Value]) -> Result<Value> {
        let args = CallArgs::new(operation, args)?;

        let result = match operation {
            Operation::GetSystemStats => self.get_system_stats().to_value(),
            Operation::FastHashPassword => {
                Value::String(self.fast_hash_password(args.string(0)?, args.string(1)?))
            }
            Operation::ValidateInputFast => {
                let outcome =
                    self.validate_input_fast(args.string(0)?, args.integer(1)?, args.integer(2)?);
                json!([outcome.is_valid, outcome.message])
            }
            Operation::FastStringCompare => {
                Value::Bool(self.fast_string_compare(args.string(0)?, args.string(1)?))
            }
        };

        Ok(result)
    }
}

impl Default for NativeOps {
    fn default() -> Self {
        Self::from_config(&OpsConfig::default())
    }
}

/// Arity-checked positional arguments for one call.
struct CallArgs<'a> {
    operation: Operation,
    values: &'a [Value],
}

impl<'a> CallArgs<'a> {
    fn new(operation: Operation, values: &'a [Value]) -> Result<Self> {
        let expected = operation.arity();
        if values.len() != expected {
            return Err(OpsError::argument(
                operation.name(),
                format!(
                    "expected {} argument{}, got {}",
                    expected,
                    if expected == 1 { "" } else { "s" },
                    values.len()
                ),
            ));
        }
        Ok(Self { operation, values })
    }

    fn string(&self, index: usize) -> Result<&'a str> {
        let values: &'a [Value] = self.values;
        let value = &values[index];
        value
            .as_str()
            .ok_or_else(|| self.type_error(index, "a string", value))
    }

    fn integer(&self, index: usize) -> Result<i64> {
        let value = &self.values[index];
        value
            .as_i64()
            .ok_or_else(|| self.type_error(index, "an integer", value))
    }

    fn type_error(&self, index: usize, expected: &str, got: &Value) -> OpsError {
        OpsError::argument(
            self.operation.name(),
            format!(
                "argument '{}' must be {}, got {}",
                self.operation.params()[index],
                expected,
                value_kind(got)
            ),
        )
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(_) => "integer out of range",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingSource, ManualClock};

    fn table() -> (NativeOps, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_700_000_000));
        let ops = NativeOps::new(
            StatsCache::new(Arc::new(CountingSource::new())),
            clock.clone(),
            Duration::from_secs(5),
        );
        (ops, clock)
    }

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
        assert!(matches!(
            "get_stats".parse::<Operation>(),
            Err(OpsError::UnknownOperation(_))
        ));
    }

    #[test]
    fn test_call_hash() {
        let (ops, _) = table();
        let digest = ops
            .call("fast_hash_password", &[json!("pw"), json!("salt")])
            .unwrap();
        assert_eq!(digest, json!("000006531b38c340"));
    }

    #[test]
    fn test_call_validate_returns_pair() {
        let (ops, _) = table();
        assert_eq!(
            ops.call("validate_input_fast", &[json!("hello"), json!(1), json!(10)])
                .unwrap(),
            json!([true, ""])
        );
        assert_eq!(
            ops.call("validate_input_fast", &[json!("ab"), json!(3), json!(10)])
                .unwrap(),
            json!([false, "Invalid input"])
        );
    }

    #[test]
    fn test_call_compare() {
        let (ops, _) = table();
        assert_eq!(
            ops.call("fast_string_compare", &[json!("abc"), json!("abc")])
                .unwrap(),
            json!(true)
        );
        assert_eq!(
            ops.call("fast_string_compare", &[json!("abc"), json!("abcx")])
                .unwrap(),
            json!(false)
        );
    }

    #[test]
    fn test_call_stats_uses_clock() {
        let (ops, clock) = table();
        let first = ops.call("get_system_stats", &[]).unwrap();
        clock.advance(3);
        let second = ops.call("get_system_stats", &[]).unwrap();
        clock.advance(2);
        let third = ops.call("get_system_stats", &[]).unwrap();

        assert_eq!(first["timestamp"], json!(1_700_000_000));
        assert_eq!(second["timestamp"], first["timestamp"]);
        assert_eq!(third["timestamp"], json!(1_700_000_005));
    }

    #[test]
    fn test_wrong_arity_is_argument_error() {
        let (ops, _) = table();
        let err = ops.call("fast_hash_password", &[json!("pw")]).unwrap_err();
        assert!(err.is_argument_error());
        assert!(err.to_string().contains("expected 2 arguments, got 1"));

        let err = ops.call("get_system_stats", &[json!(1)]).unwrap_err();
        assert!(err.to_string().contains("expected 0 arguments, got 1"));
    }

    #[test]
    fn test_wrong_type_is_argument_error() {
        let (ops, _) = table();

        let err = ops
            .call("fast_string_compare", &[json!(1), json!("a")])
            .unwrap_err();
        assert!(err.is_argument_error());
        assert!(err.to_string().contains("argument 'a' must be a string, got integer"));

        let err = ops
            .call("validate_input_fast", &[json!("x"), json!(1.5), json!(3)])
            .unwrap_err();
        assert!(err.to_string().contains("'min_len' must be an integer, got float"));

        let err = ops
            .call("validate_input_fast", &[json!("x"), json!(1), json!(null)])
            .unwrap_err();
        assert!(err.to_string().contains("'max_len' must be an integer, got null"));
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(value_kind(&json!(u64::MAX)), "integer out of range");
        assert_eq!(value_kind(&json!(-3)), "integer");
        assert_eq!(value_kind(&json!({"a": 1})), "mapping");
        assert_eq!(value_kind(&json!([1])), "list");
        assert_eq!(value_kind(&json!(true)), "bool");
    }
}
