//! Python extension module `admin_extension`.
//!
//! Import builds one [`NativeOps`] table and binds its four operations as
//! module-level callables. pyo3 converts arguments, so wrong arity or a
//! mistyped argument raises `TypeError` in the caller.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use adminx_core::{NativeOps, Operation, SystemSnapshot, MODULE_DESCRIPTION};

/// Holder for the table the module-level callables are bound to.
#[pyclass(name = "AdminOps", module = "admin_extension", frozen)]
struct AdminOps {
    ops: NativeOps,
}

#[pymethods]
impl AdminOps {
    /// Get system statistics (cached)
    fn get_system_stats<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let snapshot = py.allow_threads(|| self.ops.get_system_stats());
        snapshot_to_dict(py, &snapshot)
    }

    /// Fast password hashing (non-cryptographic placeholder)
    fn fast_hash_password(&self, password: &str, salt: &str) -> String {
        self.ops.fast_hash_password(password, salt)
    }

    /// Fast input validation
    fn validate_input_fast(&self, input_str: &str, min_len: i64, max_len: i64) -> (bool, String) {
        let outcome = self.ops.validate_input_fast(input_str, min_len, max_len);
        (outcome.is_valid, outcome.message)
    }

    /// Timing-safe string comparison
    fn fast_string_compare(&self, str1: &str, str2: &str) -> bool {
        self.ops.fast_string_compare(str1, str2)
    }
}

fn snapshot_to_dict<'py>(py: Python<'py>, snapshot: &SystemSnapshot) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("total_users", snapshot.total_users)?;
    dict.set_item("active_sessions", snapshot.active_sessions)?;
    dict.set_item("admin_sessions", snapshot.admin_sessions)?;
    dict.set_item("cpu_usage", snapshot.cpu_usage)?;
    dict.set_item("memory_usage", snapshot.memory_usage)?;
    dict.set_item("timestamp", snapshot.timestamp)?;
    Ok(dict)
}

#[pymodule]
fn admin_extension(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let table = Bound::new(
        m.py(),
        AdminOps {
            ops: NativeOps::default(),
        },
    )?;

    for op in Operation::ALL {
        m.add(op.name(), table.getattr(op.name())?)?;
    }

    m.add("__doc__", MODULE_DESCRIPTION)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
