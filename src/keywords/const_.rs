//! `const`: the instance must strictly equal a single fixed value.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::strict::StrictValue;

struct ConstValidator {
    expected: Value,
}

impl ValidatorNode for ConstValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        if StrictValue::new(value) == StrictValue::new(&self.expected) {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "const",
                format!("{} does not equal {}", value, self.expected),
            ))
        }
    }
}

pub(crate) fn compile(
    _schema: &Map<String, Value>,
    value: &Value,
    _compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    Some(Ok(Box::new(ConstValidator { expected: value.clone() })))
}
