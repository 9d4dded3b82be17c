use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GROUPING_MODIFIERS, Operand, ensure_modifiers_read};
use crate::datamodel::Value;
use crate::error::EvalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationOp {
    Avg,
    Sum,
    Max,
    Min,
    Count,
}

impl AggregationOp {
    /// Reduces a list of values. `avg`, `max` and `min` of nothing is NaN.
    pub fn reduce(self, values: &[f64]) -> f64 {
        match self {
            AggregationOp::Sum => values.iter().sum(),
            AggregationOp::Count => values.len() as f64,
            AggregationOp::Avg => {
                if values.is_empty() {
                    f64::NAN
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            }
            AggregationOp::Max => values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN),
            AggregationOp::Min => values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AggregationOp::Avg => "avg",
            AggregationOp::Sum => "sum",
            AggregationOp::Max => "max",
            AggregationOp::Min => "min",
            AggregationOp::Count => "count",
        }
    }
}

impl fmt::Display for AggregationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Aggregates a vector using the grouping clause attached to it.
pub fn aggregation(op: AggregationOp, operand: Operand) -> Result<Value, EvalError> {
    match operand {
        Operand::Vector(vector, modifiers) => {
            ensure_modifiers_read(&modifiers, GROUPING_MODIFIERS)?;
            Ok(vector.aggregate(modifiers.grouping(), |values| op.reduce(values)))
        }
        Operand::Scalar(_) => Err(EvalError::vector_expected(op)),
    }
}
