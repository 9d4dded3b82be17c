//! Operators of the expression language.
//!
//! Each operator dispatches on the shape of its operands (scalar or
//! vector) and delegates vector work to [`InstantVector`].

pub mod aggregation;
pub mod arithmetic;
pub mod comparison;
pub mod functions;
pub mod set;

pub use aggregation::{AggregationOp, aggregation};
pub use arithmetic::{ArithmeticOp, arithmetic};
pub use comparison::{ComparisonOp, comparison};
pub use functions::absent;
pub use set::{SetOp, set_operation};

use crate::datamodel::{InstantVector, Modifiers, Value};
use crate::error::EvalError;

/// Modifiers read by a join between two vectors, on the right operand.
pub(crate) const JOIN_MODIFIERS: &[&str] = &["on", "ignoring", "group_left", "group_right"];
pub(crate) const GROUPING_MODIFIERS: &[&str] = &["by", "without"];

/// Fails on the first modifier in `modifiers` that is not in `read`.
///
/// A modifier attached where no operator reads it would otherwise be ignored
/// without notice.
pub(crate) fn ensure_modifiers_read(
    modifiers: &Modifiers,
    read: &[&str],
) -> Result<(), EvalError> {
    match modifiers.keywords().find(|keyword| !read.contains(keyword)) {
        Some(keyword) => Err(EvalError::UnsupportedGroupingUsage {
            modifier: keyword.to_string(),
        }),
        None => Ok(()),
    }
}

/// An evaluated sub-expression on its way into an operator.
///
/// Vectors travel with the modifiers the expression attached to them.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(f64),
    Vector(InstantVector, Modifiers),
}

impl Operand {
    pub fn vector(vector: InstantVector) -> Self {
        Operand::Vector(vector, Modifiers::default())
    }

    pub fn into_value(self) -> Value {
        match self {
            Operand::Scalar(value) => Value::Scalar(value),
            Operand::Vector(vector, _) => Value::Vector(vector),
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        match value {
            Value::Scalar(value) => Operand::Scalar(value),
            Value::Vector(vector) => Operand::vector(vector),
        }
    }
}
