//! Test utilities for building vectors and inspecting evaluation results.

use crate::datamodel::{InstantVector, SensAppDateTime, SensAppDateTimeExt, Value};

/// Timestamp shared by the test vectors: 2023-11-14T22:13:20Z
pub fn test_time() -> SensAppDateTime {
    SensAppDateTime::from_unix_seconds_i64(1_700_000_000)
}

/// Builds a vector at [`test_time`] from `(labels, value)` rows.
pub fn vector(rows: &[(&[(&str, &str)], f64)]) -> InstantVector {
    InstantVector::from_rows(
        test_time(),
        rows.iter()
            .map(|(labels, value)| (labels.iter().copied(), *value)),
    )
}

/// Builds a vector with a single `host` label per sample.
pub fn hosts(values: &[(&str, f64)]) -> InstantVector {
    InstantVector::from_rows(
        test_time(),
        values
            .iter()
            .map(|(host, value)| ([("host", *host)], *value)),
    )
}

/// Sample values of a vector result, in order.
///
/// Panics when the value is a scalar.
pub fn vector_values(value: &Value) -> Vec<f64> {
    value
        .as_vector()
        .expect("Expected a vector")
        .iter()
        .map(|sample| sample.value)
        .collect()
}

/// Values of the `name` label across a vector result, empty when missing.
///
/// Panics when the value is a scalar.
pub fn label_values(value: &Value, name: &str) -> Vec<String> {
    value
        .as_vector()
        .expect("Expected a vector")
        .iter()
        .map(|sample| sample.labels.get(name).unwrap_or_default().to_string())
        .collect()
}

pub fn vector_hosts(value: &Value) -> Vec<String> {
    label_values(value, "host")
}
