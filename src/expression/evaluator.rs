//! Expression evaluation.
//!
//! The tree is evaluated bottom-up. Modifier nodes attach their settings to
//! the vector they wrap, and the enclosing operator reads them from there.

use tracing::{debug, trace};

use super::ast::{Expr, Modifier};
use super::scope::Scope;
use crate::config::ExprConfig;
use crate::datamodel::Value;
use crate::error::EvalError;
use crate::operators::{self, Operand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationOptions {
    /// Fail when scalar arithmetic yields NaN or an infinity.
    pub reject_non_finite: bool,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            reject_non_finite: true,
        }
    }
}

impl From<&ExprConfig> for EvaluationOptions {
    fn from(config: &ExprConfig) -> Self {
        Self {
            reject_non_finite: config.reject_non_finite,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    options: EvaluationOptions,
}

impl Evaluator {
    pub fn new(options: EvaluationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> EvaluationOptions {
        self.options
    }

    /// Evaluates `expr` against `scope`.
    ///
    /// Vectors are copied out of the scope, so the scope can be reused for
    /// another evaluation afterwards.
    pub fn evaluate(&self, expr: &Expr, scope: &Scope) -> Result<Value, EvalError> {
        debug!("Evaluating expression with {} scope entries", scope.len());
        let result = self.evaluate_operand(expr, scope).map(Operand::into_value);
        match &result {
            Ok(Value::Scalar(value)) => debug!("Evaluation returned scalar {}", value),
            Ok(Value::Vector(vector)) => {
                debug!("Evaluation returned a vector of {} samples", vector.len())
            }
            Err(err) => debug!("Evaluation failed: {}", err),
        }
        result
    }

    fn evaluate_operand(&self, expr: &Expr, scope: &Scope) -> Result<Operand, EvalError> {
        let value = match expr {
            Expr::Number { value } => return Ok(Operand::Scalar(*value)),
            Expr::Variable { name } => {
                let value = scope
                    .get(name)
                    .ok_or_else(|| EvalError::UnknownVariable { name: name.clone() })?;
                trace!("Resolved variable {} to a {}", name, value.type_name());
                return Ok(Operand::from(value.clone()));
            }
            Expr::Modifier { modifier, expr } => {
                let operand = self.evaluate_operand(expr, scope)?;
                return apply_modifier(modifier, operand);
            }
            Expr::Arithmetic { op, lhs, rhs } => {
                let lhs = self.evaluate_operand(lhs, scope)?;
                let rhs = self.evaluate_operand(rhs, scope)?;
                operators::arithmetic(*op, lhs, rhs, self.options.reject_non_finite)?
            }
            Expr::Comparison { op, lhs, rhs } => {
                let lhs = self.evaluate_operand(lhs, scope)?;
                let rhs = self.evaluate_operand(rhs, scope)?;
                operators::comparison(*op, lhs, rhs)?
            }
            Expr::Set { op, lhs, rhs } => {
                let lhs = self.evaluate_operand(lhs, scope)?;
                let rhs = self.evaluate_operand(rhs, scope)?;
                operators::set_operation(*op, lhs, rhs)?
            }
            Expr::Aggregation { op, arg } => {
                operators::aggregation(*op, self.evaluate_operand(arg, scope)?)?
            }
            Expr::Absent { arg } => operators::absent(self.evaluate_operand(arg, scope)?)?,
        };
        // operator results start with fresh modifiers
        Ok(Operand::from(value))
    }
}

fn apply_modifier(modifier: &Modifier, operand: Operand) -> Result<Operand, EvalError> {
    let Operand::Vector(vector, modifiers) = operand else {
        return Err(EvalError::UnsupportedGroupingUsage {
            modifier: modifier.name().to_string(),
        });
    };
    let modifiers = match modifier {
        Modifier::On(labels) => modifiers.on(labels),
        Modifier::Ignoring(labels) => modifiers.ignoring(labels),
        Modifier::By(labels) => modifiers.by(labels),
        Modifier::Without(labels) => modifiers.without(labels),
        Modifier::GroupLeft(labels) => modifiers.group_left(labels),
        Modifier::GroupRight(labels) => modifiers.group_right(labels),
        Modifier::Bool => modifiers.bool(),
    };
    Ok(Operand::Vector(vector, modifiers))
}

/// Evaluates `expr` against `scope` with the default options.
pub fn evaluate(expr: &Expr, scope: &Scope) -> Result<Value, EvalError> {
    Evaluator::default().evaluate(expr, scope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::{InstantVector, SensAppDateTime, SensAppDateTimeExt};

    fn metric() -> InstantVector {
        InstantVector::from_rows(
            SensAppDateTime::from_unix_seconds_i64(0),
            [(vec![("foo", "bar")], 2.0), (vec![("foo", "baz")], 3.0)],
        )
    }

    #[test]
    fn test_scalar_expressions() {
        let scope = Scope::new();
        let two_by_four = Expr::divide(Expr::number(2.0), Expr::number(4.0));
        assert_eq!(evaluate(&two_by_four, &scope).unwrap(), Value::Scalar(0.5));

        let nested = Expr::multiply(
            Expr::add(Expr::number(1.0), Expr::number(2.0)),
            Expr::var("x"),
        );
        let scope = Scope::new().with("x", 4.0);
        assert_eq!(evaluate(&nested, &scope).unwrap(), Value::Scalar(12.0));
    }

    #[test]
    fn test_non_finite_option() {
        let expr = Expr::divide(Expr::number(1.0), Expr::number(0.0));
        assert!(matches!(
            evaluate(&expr, &Scope::new()),
            Err(EvalError::NonFiniteResult { .. })
        ));

        let lenient = Evaluator::new(EvaluationOptions {
            reject_non_finite: false,
        });
        assert_eq!(
            lenient.evaluate(&expr, &Scope::new()).unwrap(),
            Value::Scalar(f64::INFINITY)
        );
    }

    #[test]
    fn test_unknown_variable() {
        let error = evaluate(&Expr::var("missing"), &Scope::new()).unwrap_err();
        assert_eq!(
            error,
            EvalError::UnknownVariable {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_modifier_on_scalar() {
        let expr = Expr::add(Expr::var("metric"), Expr::number(1.0).ignoring(["foo"]));
        let scope = Scope::new().with("metric", metric());
        let error = evaluate(&expr, &scope).unwrap_err();
        assert_eq!(
            error,
            EvalError::UnsupportedGroupingUsage {
                modifier: "ignoring".to_string()
            }
        );
    }

    #[test]
    fn test_scope_is_not_modified() {
        let scope = Scope::new().with("metric", metric());
        let expr = Expr::sum(Expr::var("metric").by(["foo"]));

        let first = evaluate(&expr, &scope).unwrap();
        // the same scope without the grouping yields a scalar
        let second = evaluate(&Expr::sum(Expr::var("metric")), &scope).unwrap();

        assert_eq!(first.as_vector().map(|vector| vector.len()), Some(2));
        assert_eq!(second, Value::Scalar(5.0));
        assert_eq!(scope.get("metric"), Some(&Value::Vector(metric())));
    }
}
