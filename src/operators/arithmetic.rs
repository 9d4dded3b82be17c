use std::fmt;

use serde::{Deserialize, Serialize};

use super::{JOIN_MODIFIERS, Operand, ensure_modifiers_read};
use crate::datamodel::Value;
use crate::error::EvalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    #[serde(alias = "mod")]
    Modulo,
    #[serde(alias = "pow")]
    Power,
}

impl ArithmeticOp {
    #[inline]
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            ArithmeticOp::Add => lhs + rhs,
            ArithmeticOp::Subtract => lhs - rhs,
            ArithmeticOp::Multiply => lhs * rhs,
            ArithmeticOp::Divide => lhs / rhs,
            ArithmeticOp::Modulo => lhs % rhs,
            ArithmeticOp::Power => lhs.powf(rhs),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Subtract => "subtract",
            ArithmeticOp::Multiply => "multiply",
            ArithmeticOp::Divide => "divide",
            ArithmeticOp::Modulo => "mod",
            ArithmeticOp::Power => "pow",
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Applies an arithmetic operator to any combination of scalars and vectors.
///
/// Two vectors are joined using the right operand's matching modifiers; any
/// other modifier is rejected. A scalar is broadcast over every sample of a
/// vector, labels unchanged. When `reject_non_finite` is set, a scalar
/// result must be finite.
pub fn arithmetic(
    op: ArithmeticOp,
    lhs: Operand,
    rhs: Operand,
    reject_non_finite: bool,
) -> Result<Value, EvalError> {
    match (lhs, rhs) {
        (Operand::Scalar(lhs), Operand::Scalar(rhs)) => {
            let value = op.apply(lhs, rhs);
            if reject_non_finite && !value.is_finite() {
                return Err(EvalError::NonFiniteResult {
                    operator: op.to_string(),
                    value,
                });
            }
            Ok(Value::Scalar(value))
        }
        (Operand::Vector(lhs, lhs_modifiers), Operand::Vector(rhs, modifiers)) => {
            ensure_modifiers_read(&lhs_modifiers, &[])?;
            ensure_modifiers_read(&modifiers, JOIN_MODIFIERS)?;
            lhs.binop(&rhs, &modifiers.join_spec(), |a, b| (op.apply(a, b), true))
                .map(Value::Vector)
        }
        (Operand::Vector(lhs, modifiers), Operand::Scalar(rhs)) => {
            ensure_modifiers_read(&modifiers, &[])?;
            Ok(Value::Vector(
                lhs.map_values(|value| (op.apply(value, rhs), true)),
            ))
        }
        (Operand::Scalar(lhs), Operand::Vector(rhs, modifiers)) => {
            ensure_modifiers_read(&modifiers, &[])?;
            Ok(Value::Vector(
                rhs.map_values(|value| (op.apply(lhs, value), true)),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::Modifiers;
    use crate::test_utils::*;

    #[test]
    fn test_scalar_arithmetic() {
        let cases = [
            (ArithmeticOp::Add, 2.0, 4.0, 6.0),
            (ArithmeticOp::Subtract, 2.0, 4.0, -2.0),
            (ArithmeticOp::Multiply, 2.0, 4.0, 8.0),
            (ArithmeticOp::Divide, 2.0, 4.0, 0.5),
            (ArithmeticOp::Modulo, 7.0, 4.0, 3.0),
            (ArithmeticOp::Power, 2.0, 4.0, 16.0),
        ];
        for (op, lhs, rhs, expected) in cases {
            let result =
                arithmetic(op, Operand::Scalar(lhs), Operand::Scalar(rhs), true).unwrap();
            assert_eq!(result, Value::Scalar(expected), "{}", op);
        }
    }

    #[test]
    fn test_scalar_non_finite() {
        let error = arithmetic(
            ArithmeticOp::Divide,
            Operand::Scalar(1.0),
            Operand::Scalar(0.0),
            true,
        )
        .unwrap_err();
        assert!(matches!(error, EvalError::NonFiniteResult { .. }));

        let result = arithmetic(
            ArithmeticOp::Divide,
            Operand::Scalar(1.0),
            Operand::Scalar(0.0),
            false,
        )
        .unwrap();
        assert_eq!(result, Value::Scalar(f64::INFINITY));
    }

    #[test]
    fn test_broadcast() {
        let metric = hosts(&[("h1", 2.0), ("h2", 3.0)]);

        let result = arithmetic(
            ArithmeticOp::Multiply,
            Operand::vector(metric.clone()),
            Operand::Scalar(2.0),
            true,
        )
        .unwrap();
        assert_eq!(vector_values(&result), vec![4.0, 6.0]);
        assert_eq!(vector_hosts(&result), vec!["h1", "h2"]);

        let result = arithmetic(
            ArithmeticOp::Subtract,
            Operand::Scalar(10.0),
            Operand::vector(metric),
            true,
        )
        .unwrap();
        assert_eq!(vector_values(&result), vec![8.0, 7.0]);
    }

    #[test]
    fn test_vector_vector_uses_right_modifiers() {
        let left = hosts(&[("h1", 10.0), ("h2", 20.0)]);
        let right = hosts(&[("h2", 4.0), ("h3", 1.0)]);

        let result = arithmetic(
            ArithmeticOp::Divide,
            Operand::vector(left.clone()),
            Operand::vector(right.clone()),
            true,
        )
        .unwrap();
        assert_eq!(vector_values(&result), vec![5.0]);

        // on() with no labels matches everything against a single right sample
        let single = hosts(&[("h9", 2.0)]);
        let modifiers = Modifiers::new()
            .on(Vec::<String>::new())
            .group_left(Vec::<String>::new());
        let result = arithmetic(
            ArithmeticOp::Divide,
            Operand::vector(left),
            Operand::Vector(single, modifiers),
            true,
        )
        .unwrap();
        assert_eq!(vector_values(&result), vec![5.0, 10.0]);
        assert_eq!(vector_hosts(&result), vec!["h1", "h2"]);
    }

    #[test]
    fn test_unread_modifiers_are_rejected() {
        let left = hosts(&[("h1", 10.0), ("h2", 20.0)]);
        let right = hosts(&[("h1", 2.0), ("h2", 4.0)]);

        let error = arithmetic(
            ArithmeticOp::Divide,
            Operand::Vector(left.clone(), Modifiers::new().ignoring(["env"])),
            Operand::vector(right.clone()),
            true,
        )
        .unwrap_err();
        assert_eq!(
            error,
            EvalError::UnsupportedGroupingUsage {
                modifier: "ignoring".to_string()
            }
        );

        let error = arithmetic(
            ArithmeticOp::Divide,
            Operand::vector(left.clone()),
            Operand::Vector(right, Modifiers::new().on(["host"]).by(["host"])),
            true,
        )
        .unwrap_err();
        assert_eq!(
            error,
            EvalError::UnsupportedGroupingUsage {
                modifier: "by".to_string()
            }
        );

        let error = arithmetic(
            ArithmeticOp::Add,
            Operand::Vector(left, Modifiers::new().bool()),
            Operand::Scalar(1.0),
            true,
        )
        .unwrap_err();
        assert!(matches!(error, EvalError::UnsupportedGroupingUsage { .. }));
    }
}
