//! `minProperties`: a lower bound on an object's key count.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;

struct MinPropertiesValidator {
    limit: u64,
}

impl ValidatorNode for MinPropertiesValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        let object = value.as_object()?;
        if object.len() as u64 >= self.limit {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "minProperties",
                format!("object with {} properties has fewer than the minimum of {}", object.len(), self.limit),
            ))
        }
    }
}

pub(crate) fn compile(
    schema: &Map<String, Value>,
    value: &Value,
    _compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    if !keyword_applies(schema, &[PrimitiveType::Object]) {
        return None;
    }
    let limit = match value.as_u64() {
        Some(n) => n,
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "minProperties".to_string() })),
    };
    Some(Ok(Box::new(MinPropertiesValidator { limit })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_objects_with_too_few_keys() {
        let node = MinPropertiesValidator { limit: 2 };
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&serde_json::json!({"a": 1}), &mut path, &table).is_some());
        assert!(node.validate(&serde_json::json!({"a": 1, "b": 2}), &mut path, &table).is_none());
    }
}
