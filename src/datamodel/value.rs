use serde::{Deserialize, Serialize};

use super::instant_vector::InstantVector;

/// Result of an evaluation, and what a scope binds names to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Scalar(f64),
    Vector(InstantVector),
}

impl Value {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(value) => Some(*value),
            Value::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<&InstantVector> {
        match self {
            Value::Scalar(_) => None,
            Value::Vector(vector) => Some(vector),
        }
    }

    pub fn into_vector(self) -> Option<InstantVector> {
        match self {
            Value::Scalar(_) => None,
            Value::Vector(vector) => Some(vector),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Vector(_) => "vector",
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value)
    }
}

impl From<InstantVector> for Value {
    fn from(vector: InstantVector) -> Self {
        Value::Vector(vector)
    }
}
