//! Expression trees as produced by the query parser.
//!
//! Modifier keywords (`on`, `ignoring`, `by`, `group_left`, `bool`, ...)
//! are nodes wrapping the operand they configure, the same way the parser
//! turns `ignoring(env) b` into a call around `b`.

use serde::{Deserialize, Serialize};

use crate::operators::{AggregationOp, ArithmeticOp, ComparisonOp, SetOp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    On(Vec<String>),
    Ignoring(Vec<String>),
    By(Vec<String>),
    Without(Vec<String>),
    GroupLeft(Vec<String>),
    GroupRight(Vec<String>),
    Bool,
}

impl Modifier {
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::On(_) => "on",
            Modifier::Ignoring(_) => "ignoring",
            Modifier::By(_) => "by",
            Modifier::Without(_) => "without",
            Modifier::GroupLeft(_) => "group_left",
            Modifier::GroupRight(_) => "group_right",
            Modifier::Bool => "bool",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expr {
    Number {
        value: f64,
    },
    Variable {
        name: String,
    },
    Arithmetic {
        op: ArithmeticOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Comparison {
        op: ComparisonOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Set {
        op: SetOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Aggregation {
        op: AggregationOp,
        arg: Box<Expr>,
    },
    Absent {
        arg: Box<Expr>,
    },
    Modifier {
        modifier: Modifier,
        expr: Box<Expr>,
    },
}

fn names<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    labels.into_iter().map(Into::into).collect()
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Expr::Number { value }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable { name: name.into() }
    }

    pub fn arithmetic(op: ArithmeticOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Arithmetic {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn comparison(op: ComparisonOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Comparison {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn set(op: SetOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Set {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn aggregation(op: AggregationOp, arg: Expr) -> Self {
        Expr::Aggregation {
            op,
            arg: Box::new(arg),
        }
    }

    pub fn absent(arg: Expr) -> Self {
        Expr::Absent { arg: Box::new(arg) }
    }

    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Self::arithmetic(ArithmeticOp::Add, lhs, rhs)
    }

    pub fn subtract(lhs: Expr, rhs: Expr) -> Self {
        Self::arithmetic(ArithmeticOp::Subtract, lhs, rhs)
    }

    pub fn multiply(lhs: Expr, rhs: Expr) -> Self {
        Self::arithmetic(ArithmeticOp::Multiply, lhs, rhs)
    }

    pub fn divide(lhs: Expr, rhs: Expr) -> Self {
        Self::arithmetic(ArithmeticOp::Divide, lhs, rhs)
    }

    pub fn sum(arg: Expr) -> Self {
        Self::aggregation(AggregationOp::Sum, arg)
    }

    pub fn avg(arg: Expr) -> Self {
        Self::aggregation(AggregationOp::Avg, arg)
    }

    pub fn max(arg: Expr) -> Self {
        Self::aggregation(AggregationOp::Max, arg)
    }

    pub fn min(arg: Expr) -> Self {
        Self::aggregation(AggregationOp::Min, arg)
    }

    pub fn with_modifier(self, modifier: Modifier) -> Self {
        Expr::Modifier {
            modifier,
            expr: Box::new(self),
        }
    }

    pub fn on<I: IntoIterator<Item = S>, S: Into<String>>(self, labels: I) -> Self {
        self.with_modifier(Modifier::On(names(labels)))
    }

    pub fn ignoring<I: IntoIterator<Item = S>, S: Into<String>>(self, labels: I) -> Self {
        self.with_modifier(Modifier::Ignoring(names(labels)))
    }

    pub fn by<I: IntoIterator<Item = S>, S: Into<String>>(self, labels: I) -> Self {
        self.with_modifier(Modifier::By(names(labels)))
    }

    pub fn without<I: IntoIterator<Item = S>, S: Into<String>>(self, labels: I) -> Self {
        self.with_modifier(Modifier::Without(names(labels)))
    }

    pub fn group_left<I: IntoIterator<Item = S>, S: Into<String>>(self, labels: I) -> Self {
        self.with_modifier(Modifier::GroupLeft(names(labels)))
    }

    pub fn group_right<I: IntoIterator<Item = S>, S: Into<String>>(self, labels: I) -> Self {
        self.with_modifier(Modifier::GroupRight(names(labels)))
    }

    pub fn bool(self) -> Self {
        self.with_modifier(Modifier::Bool)
    }
}
