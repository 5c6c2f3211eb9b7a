//! `propertyNames`: every instance key, treated as a string instance,
//! must satisfy the given subschema.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;

struct PropertyNamesValidator {
    node: Box<dyn ValidatorNode>,
}

impl ValidatorNode for PropertyNamesValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        let object = value.as_object()?;
        object.keys().find_map(|key| self.node.validate(&Value::String(key.clone()), path, table))
    }
}

pub(crate) fn compile(
    schema: &Map<String, Value>,
    value: &Value,
    compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    if !keyword_applies(schema, &[PrimitiveType::Object]) {
        return None;
    }
    let node = match compiler.compile_one(value) {
        Ok(node) => node,
        Err(e) => return Some(Err(e)),
    };
    Some(Ok(Box::new(PropertyNamesValidator { node })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatRegistry;
    use crate::handlers::HandlerRegistry;
    use crate::resolver::Resolver;
    use serde_json::json;

    #[test]
    fn rejects_objects_with_a_disallowed_key() {
        let schema = json!({"propertyNames": {"pattern": "^[a-z]+$"}});
        let resolver = Resolver::new(&schema, HandlerRegistry::default()).unwrap();
        let mut compiler = Compiler::for_test(resolver, FormatRegistry::with_defaults());
        let obj = schema.as_object().unwrap().clone();
        let value = obj.get("propertyNames").unwrap().clone();
        let node = compile(&obj, &value, &mut compiler).unwrap().unwrap();
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!({"ok": 1}), &mut path, &table).is_none());
        assert!(node.validate(&json!({"NotOk": 1}), &mut path, &table).is_some());
    }
}
