use super::{Operand, ensure_modifiers_read};
use crate::datamodel::{InstantVector, LabelSet, Sample, Value};
use crate::error::EvalError;

/// `1` without labels when the vector is empty, nothing otherwise.
pub fn absent(operand: Operand) -> Result<Value, EvalError> {
    match operand {
        Operand::Vector(vector, modifiers) => {
            ensure_modifiers_read(&modifiers, &[])?;
            let result = if vector.is_empty() {
                InstantVector::new(vector.time(), vec![Sample::new(LabelSet::new(), 1.0)])
            } else {
                InstantVector::empty(vector.time())
            };
            Ok(Value::Vector(result))
        }
        Operand::Scalar(_) => Err(EvalError::vector_expected("absent")),
    }
}
