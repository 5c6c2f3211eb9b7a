//! `maxProperties`: an upper bound on an object's key count.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;

struct MaxPropertiesValidator {
    limit: u64,
}

impl ValidatorNode for MaxPropertiesValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        let object = value.as_object()?;
        if object.len() as u64 <= self.limit {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "maxProperties",
                format!("object with {} properties has more than the maximum of {}", object.len(), self.limit),
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
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "maxProperties".to_string() })),
    };
    Some(Ok(Box::new(MaxPropertiesValidator { limit })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_objects_with_too_many_keys() {
        let node = MaxPropertiesValidator { limit: 1 };
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&serde_json::json!({"a": 1}), &mut path, &table).is_none());
        assert!(node.validate(&serde_json::json!({"a": 1, "b": 2}), &mut path, &table).is_some());
    }
}
