//! `maxLength`: an upper bound on a string's Unicode code-point count.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;

struct MaxLengthValidator {
    limit: u64,
}

impl ValidatorNode for MaxLengthValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        let s = value.as_str()?;
        let len = s.chars().count() as u64;
        if len <= self.limit {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "maxLength",
                format!("{:?} is longer than the maximum length of {}", s, self.limit),
            ))
        }
    }
}

pub(crate) fn compile(
    schema: &Map<String, Value>,
    value: &Value,
    _compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    if !keyword_applies(schema, &[PrimitiveType::String]) {
        return None;
    }
    let limit = match value.as_u64() {
        Some(n) => n,
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "maxLength".to_string() })),
    };
    Some(Ok(Box::new(MaxLengthValidator { limit })))
}
