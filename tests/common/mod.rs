use sensapp_expr::{Expr, Scope, Value, evaluate};

pub mod fixtures;

/// Evaluate against the full fixture scope, panicking on errors.
#[allow(dead_code)]
pub fn eval(expr: &Expr) -> Value {
    evaluate(expr, &fixtures::scope()).expect("Evaluation failed")
}

#[allow(dead_code)]
pub fn eval_with(expr: &Expr, scope: &Scope) -> Value {
    evaluate(expr, scope).expect("Evaluation failed")
}
