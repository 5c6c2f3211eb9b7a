//! `maxItems`: an upper bound on an array's length.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;

struct MaxItemsValidator {
    limit: u64,
}

impl ValidatorNode for MaxItemsValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        let items = value.as_array()?;
        if items.len() as u64 <= self.limit {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "maxItems",
                format!("array of length {} is longer than the maximum of {}", items.len(), self.limit),
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
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "maxItems".to_string() })),
    };
    Some(Ok(Box::new(MaxItemsValidator { limit })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_long_arrays() {
        let node = MaxItemsValidator { limit: 1 };
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&serde_json::json!([1]), &mut path, &table).is_none());
        assert!(node.validate(&serde_json::json!([1, 2]), &mut path, &table).is_some());
    }
}
