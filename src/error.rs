use std::fmt;

use thiserror::Error;

use crate::datamodel::LabelSet;

/// Where a duplicate label set was found during vector matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSide {
    Left,
    Right,
    Result,
}

impl fmt::Display for MatchSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchSide::Left => f.write_str("left"),
            MatchSide::Right => f.write_str("right"),
            MatchSide::Result => f.write_str("result"),
        }
    }
}

/// Errors raised while evaluating an expression.
///
/// Every variant is fatal to the evaluation it was raised in.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Two samples share a matching signature where at most one is allowed
    #[error(
        "Duplicate label set {labels} on the {side} side of vector matching: the matching labels must identify a single sample"
    )]
    DuplicateLabelSet { labels: LabelSet, side: MatchSide },

    /// An operator received the wrong kind of operand
    #[error("Operator {operator} can only be applied to {expected}")]
    OperandType {
        operator: String,
        expected: &'static str,
    },

    /// Scalar arithmetic produced NaN or an infinity
    #[error("Operator {operator} produced a non-finite result: {value}")]
    NonFiniteResult { operator: String, value: f64 },

    /// A grouping or matching modifier was applied to a non-vector
    #[error("Modifier {modifier} can only be applied to an instant vector")]
    UnsupportedGroupingUsage { modifier: String },

    /// The expression references a name the scope does not define
    #[error("Unknown variable: {name}")]
    UnknownVariable { name: String },
}

impl EvalError {
    pub fn two_vectors_expected(operator: impl fmt::Display) -> Self {
        EvalError::OperandType {
            operator: operator.to_string(),
            expected: "two vectors",
        }
    }

    pub fn vector_expected(operator: impl fmt::Display) -> Self {
        EvalError::OperandType {
            operator: operator.to_string(),
            expected: "a vector",
        }
    }
}
