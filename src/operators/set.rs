use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Operand, ensure_modifiers_read};
use crate::datamodel::{InstantVector, Signature, Value};
use crate::error::EvalError;

/// Logical set operators. Samples are compared on their full label sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOp {
    And,
    Or,
    #[serde(alias = "not")]
    Unless,
}

impl SetOp {
    pub fn name(self) -> &'static str {
        match self {
            SetOp::And => "and",
            SetOp::Or => "or",
            SetOp::Unless => "unless",
        }
    }

    pub fn apply(self, left: InstantVector, right: &InstantVector) -> InstantVector {
        match self {
            SetOp::And => intersect(left, right, true),
            SetOp::Unless => intersect(left, right, false),
            SetOp::Or => union(left, right),
        }
    }
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn signatures(vector: &InstantVector) -> HashSet<Signature> {
    vector.iter().map(|sample| sample.signature(None)).collect()
}

/// Left samples whose label set is (or, with `present` false, is not) on the right.
fn intersect(left: InstantVector, right: &InstantVector, present: bool) -> InstantVector {
    let right_signatures = signatures(right);
    let time = left.time();
    let samples = left
        .into_samples()
        .into_iter()
        .filter(|sample| right_signatures.contains(&sample.signature(None)) == present)
        .collect();
    InstantVector::new(time, samples)
}

/// Left samples then right samples, each label set kept once, first one wins.
fn union(left: InstantVector, right: &InstantVector) -> InstantVector {
    let time = left.time();
    let mut seen = HashSet::with_capacity(left.len() + right.len());
    let samples = left
        .into_samples()
        .into_iter()
        .chain(right.iter().cloned())
        .filter(|sample| seen.insert(sample.signature(None)))
        .collect();
    InstantVector::new(time, samples)
}

/// Applies a set operator to two vectors. No modifier applies here.
pub fn set_operation(op: SetOp, lhs: Operand, rhs: Operand) -> Result<Value, EvalError> {
    match (lhs, rhs) {
        (Operand::Vector(lhs, lhs_modifiers), Operand::Vector(rhs, rhs_modifiers)) => {
            ensure_modifiers_read(&lhs_modifiers, &[])?;
            ensure_modifiers_read(&rhs_modifiers, &[])?;
            Ok(Value::Vector(op.apply(lhs, &rhs)))
        }
        _ => Err(EvalError::two_vectors_expected(op)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::Modifiers;
    use crate::test_utils::*;

    #[test]
    fn test_and_unless() {
        let left = hosts(&[("h1", 1.0), ("h2", 2.0), ("h3", 3.0)]);
        let right = hosts(&[("h3", 30.0), ("h1", 10.0)]);

        let result = set_operation(
            SetOp::And,
            Operand::vector(left.clone()),
            Operand::vector(right.clone()),
        )
        .unwrap();
        assert_eq!(vector_values(&result), vec![1.0, 3.0]);

        let result =
            set_operation(SetOp::Unless, Operand::vector(left), Operand::vector(right)).unwrap();
        assert_eq!(vector_values(&result), vec![2.0]);
        assert_eq!(vector_hosts(&result), vec!["h2"]);
    }

    #[test]
    fn test_or_prefers_left() {
        let left = hosts(&[("h1", 1.0), ("h2", 2.0)]);
        let right = hosts(&[("h2", 20.0), ("h3", 30.0)]);

        let result =
            set_operation(SetOp::Or, Operand::vector(left), Operand::vector(right)).unwrap();
        assert_eq!(vector_values(&result), vec![1.0, 2.0, 30.0]);
        assert_eq!(vector_hosts(&result), vec!["h1", "h2", "h3"]);
    }

    #[test]
    fn test_requires_two_vectors() {
        let error = set_operation(
            SetOp::And,
            Operand::vector(hosts(&[("h1", 1.0)])),
            Operand::Scalar(1.0),
        )
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Operator and can only be applied to two vectors"
        );
    }

    #[test]
    fn test_not_alias() {
        let op: SetOp = serde_json::from_str("\"not\"").unwrap();
        assert_eq!(op, SetOp::Unless);
    }

    #[test]
    fn test_separator_like_label_values_stay_distinct() {
        let left = vector(&[(&[("a", "1\u{1e}b\u{1f}2")], 7.0)]);
        let right = vector(&[(&[("a", "1"), ("b", "2")], 1.0)]);

        let result = set_operation(
            SetOp::And,
            Operand::vector(left.clone()),
            Operand::vector(right.clone()),
        )
        .unwrap();
        assert!(result.as_vector().unwrap().is_empty());

        let result =
            set_operation(SetOp::Or, Operand::vector(left), Operand::vector(right)).unwrap();
        assert_eq!(vector_values(&result), vec![7.0, 1.0]);
    }

    #[test]
    fn test_modifiers_are_rejected() {
        let left = hosts(&[("h1", 1.0)]);
        let right = hosts(&[("h1", 2.0)]);
        let error = set_operation(
            SetOp::And,
            Operand::vector(left),
            Operand::Vector(right, Modifiers::new().ignoring(["host"])),
        )
        .unwrap_err();
        assert_eq!(
            error,
            EvalError::UnsupportedGroupingUsage {
                modifier: "ignoring".to_string()
            }
        );
    }
}
