//! `minItems`: a lower bound on an array's length.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;

struct MinItemsValidator {
    limit: u64,
}

impl ValidatorNode for MinItemsValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        let items = value.as_array()?;
        if items.len() as u64 >= self.limit {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "minItems",
                format!("array of length {} is shorter than the minimum of {}", items.len(), self.limit),
            ))
        }
    }
}

pub(crate) fn compile(
    schema: &Map<String, Value>,
    value: &Value,
    _compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    if !keyword_applies(schema, &[PrimitiveType::Array]) {
        return None;
    }
    let limit = match value.as_u64() {
        Some(n) => n,
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "minItems".to_string() })),
    };
    Some(Ok(Box::new(MinItemsValidator { limit })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_arrays() {
        let node = MinItemsValidator { limit: 2 };
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&serde_json::json!([1]), &mut path, &table).is_some());
        assert!(node.validate(&serde_json::json!([1, 2]), &mut path, &table).is_none());
    }
}
