#![forbid(unsafe_code)]

pub mod config;
pub mod datamodel;
pub mod error;
pub mod expression;
pub mod operators;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use datamodel::{InstantVector, LabelSet, Sample, Value};
pub use error::{EvalError, MatchSide};
pub use expression::{Expr, Scope, evaluate};
