pub mod ast;
pub mod evaluator;
pub mod scope;

pub use ast::{Expr, Modifier};
pub use evaluator::{EvaluationOptions, Evaluator, evaluate};
pub use scope::Scope;
