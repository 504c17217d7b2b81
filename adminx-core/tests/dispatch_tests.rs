use std::sync::Arc;
use std::time::Duration;

use adminx_core::testing::{CountingSource, ManualClock};
use adminx_core::{
    MetricsBackend, NativeOps, Operation, OpsConfig, OpsError, StatsCache, SystemSnapshot,
};
use serde_json::{json, Value};

fn table() -> NativeOps {
    NativeOps::new(
        StatsCache::new(Arc::new(CountingSource::new())),
        Arc::new(ManualClock::new(1_700_000_000)),
        Duration::from_secs(5),
    )
}

#[test]
fn test_table_has_exactly_four_operations() {
    let names: Vec<&str> = Operation::ALL.iter().map(|op| op.name()).collect();
    assert_eq!(
        names,
        [
            "get_system_stats",
            "fast_hash_password",
            "validate_input_fast",
            "fast_string_compare"
        ]
    );
    for op in Operation::ALL {
        assert!(!op.description().is_empty());
    }
}

#[test]
fn test_stats_mapping_shape() {
    let value = table().call("get_system_stats", &[]).unwrap();
    let map = value.as_object().unwrap();

    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    let mut expected = SystemSnapshot::FIELDS.to_vec();
    expected.sort_unstable();
    assert_eq!(keys, expected);

    assert!(map["cpu_usage"].is_f64());
    assert!(map["timestamp"].is_i64());
    assert_eq!(map["active_sessions"], json!(2));
}

#[test]
fn test_reference_properties() {
    let ops = table();

    assert_eq!(
        ops.call("validate_input_fast", &[json!("hello"), json!(1), json!(10)])
            .unwrap(),
        json!([true, ""])
    );
    assert_eq!(
        ops.call("validate_input_fast", &[json!("bad'name"), json!(1), json!(10)])
            .unwrap(),
        json!([false, "Invalid input"])
    );
    assert_eq!(
        ops.call("validate_input_fast", &[json!("ab"), json!(3), json!(10)])
            .unwrap(),
        json!([false, "Invalid input"])
    );

    for s in ["", "token", "päss"] {
        let longer = format!("{}x", s);
        assert_eq!(
            ops.call("fast_string_compare", &[json!(s), json!(s)]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            ops.call("fast_string_compare", &[json!(s), json!(longer)])
                .unwrap(),
            Value::Bool(false)
        );
    }
}

#[test]
fn test_hash_is_deterministic_across_tables() {
    let first = table()
        .call("fast_hash_password", &[json!("pw"), json!("salt")])
        .unwrap();
    let second = NativeOps::default()
        .call("fast_hash_password", &[json!("pw"), json!("salt")])
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first, json!("000006531b38c340"));
}

#[test]
fn test_mistyped_arguments_are_argument_errors() {
    let ops = table();
    let calls: Vec<(&str, Vec<Value>)> = vec![
        ("fast_hash_password", vec![json!(123), json!("salt")]),
        ("fast_hash_password", vec![json!("pw")]),
        ("validate_input_fast", vec![json!("x"), json!("1"), json!(10)]),
        ("validate_input_fast", vec![json!("x"), json!(1)]),
        ("fast_string_compare", vec![json!(["a"]), json!("a")]),
        ("get_system_stats", vec![json!({})]),
    ];

    for (name, args) in calls {
        match ops.call(name, &args) {
            Err(OpsError::Argument { operation, .. }) => assert_eq!(operation, name),
            other => panic!("{} with {:?} gave {:?}", name, args, other),
        }
    }
}

#[test]
fn test_unknown_operation() {
    let err = table().call("drop_tables", &[]).unwrap_err();
    assert!(matches!(err, OpsError::UnknownOperation(ref n) if n == "drop_tables"));
}

#[test]
fn test_from_config_uses_configured_ttl() {
    let config = OpsConfig {
        stats_ttl_secs: 30,
        metrics: MetricsBackend::Placeholder,
    };
    let ops = NativeOps::from_config(&config);
    assert_eq!(ops.stats_ttl(), Duration::from_secs(30));
    assert_eq!(ops.cache().source_name(), "placeholder");

    let snapshot = ops.get_system_stats();
    assert_eq!(snapshot.total_users, 0);
    assert!(snapshot.timestamp > 0);
}
