//! `multipleOf`: the instance, divided by the divisor, must be an integer.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;

const EPSILON: f64 = 1e-9;

struct MultipleOfValidator {
    divisor: f64,
    integral: bool,
}

impl ValidatorNode for MultipleOfValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        let n = value.as_f64()?;
        let is_multiple = if self.integral && n.fract() == 0.0 {
            if n.abs() >= i128::MAX as f64 {
                false
            } else {
                (n as i128) % (self.divisor as i128) == 0
            }
        } else {
            let quotient = n / self.divisor;
            (quotient - quotient.round()).abs() < EPSILON
        };
        if is_multiple {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "multipleOf",
                format!("{} is not a multiple of {}", n, self.divisor),
            ))
        }
    }
}

pub(crate) fn compile(
    schema: &Map<String, Value>,
    value: &Value,
    _compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    if !keyword_applies(schema, &[PrimitiveType::Number, PrimitiveType::Integer]) {
        return None;
    }
    let divisor = match value.as_f64() {
        Some(n) if n > 0.0 => n,
        _ => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "multipleOf".to_string() })),
    };
    let integral = value.is_u64() || value.is_i64();
    Some(Ok(Box::new(MultipleOfValidator { divisor, integral })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_integer_remainder() {
        let node = MultipleOfValidator { divisor: 3.0, integral: true };
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&serde_json::json!(-9), &mut path, &table).is_none());
        assert!(node.validate(&serde_json::json!(10), &mut path, &table).is_some());
    }

    #[test]
    fn fractional_divisor_uses_epsilon() {
        let node = MultipleOfValidator { divisor: 0.1, integral: false };
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&serde_json::json!(0.3), &mut path, &table).is_none());
    }

    #[test]
    fn magnitude_beyond_i128_fails_rather_than_overflows() {
        let node = MultipleOfValidator { divisor: 3.0, integral: true };
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&serde_json::json!(1e40), &mut path, &table).is_some());
    }
}
