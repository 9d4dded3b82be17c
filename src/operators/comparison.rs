use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Operand, ensure_modifiers_read};
use crate::datamodel::Value;
use crate::error::EvalError;

const COMPARISON_JOIN_MODIFIERS: &[&str] =
    &["on", "ignoring", "group_left", "group_right", "bool"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    Smaller,
    #[serde(alias = "smallerEq")]
    SmallerEq,
    Larger,
    #[serde(alias = "largerEq")]
    LargerEq,
    Equal,
    Unequal,
}

impl ComparisonOp {
    #[inline]
    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            ComparisonOp::Smaller => lhs < rhs,
            ComparisonOp::SmallerEq => lhs <= rhs,
            ComparisonOp::Larger => lhs > rhs,
            ComparisonOp::LargerEq => lhs >= rhs,
            ComparisonOp::Equal => lhs == rhs,
            ComparisonOp::Unequal => lhs != rhs,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ComparisonOp::Smaller => "smaller",
            ComparisonOp::SmallerEq => "smallerEq",
            ComparisonOp::Larger => "larger",
            ComparisonOp::LargerEq => "largerEq",
            ComparisonOp::Equal => "equal",
            ComparisonOp::Unequal => "unequal",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
fn as_number(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

/// Applies a comparison operator.
///
/// Scalars compare to `1` or `0`. Vectors act as filters: a sample that
/// fails the comparison is dropped and one that passes keeps its value,
/// unless the vector carries the `bool` modifier, in which case every
/// sample is kept with a value of `1` or `0`.
pub fn comparison(op: ComparisonOp, lhs: Operand, rhs: Operand) -> Result<Value, EvalError> {
    match (lhs, rhs) {
        (Operand::Scalar(lhs), Operand::Scalar(rhs)) => {
            Ok(Value::Scalar(as_number(op.compare(lhs, rhs))))
        }
        (Operand::Vector(lhs, lhs_modifiers), Operand::Vector(rhs, modifiers)) => {
            ensure_modifiers_read(&lhs_modifiers, &[])?;
            ensure_modifiers_read(&modifiers, COMPARISON_JOIN_MODIFIERS)?;
            lhs.binop(&rhs, &modifiers.join_spec(), |a, b| (a, op.compare(a, b)))
                .map(Value::Vector)
        }
        (Operand::Vector(lhs, modifiers), Operand::Scalar(rhs)) => {
            ensure_modifiers_read(&modifiers, &["bool"])?;
            let return_bool = modifiers.return_bool();
            Ok(Value::Vector(lhs.map_values(|value| {
                let keep = op.compare(value, rhs);
                if return_bool {
                    (as_number(keep), true)
                } else {
                    (value, keep)
                }
            })))
        }
        (Operand::Scalar(lhs), Operand::Vector(rhs, modifiers)) => {
            ensure_modifiers_read(&modifiers, &["bool"])?;
            let return_bool = modifiers.return_bool();
            Ok(Value::Vector(rhs.map_values(|value| {
                let keep = op.compare(lhs, value);
                if return_bool {
                    (as_number(keep), true)
                } else {
                    (value, keep)
                }
            })))
        }
    }
}
