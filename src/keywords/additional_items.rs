//! `additionalItems`: governs array elements past the end of a tuple
//! `items` schema. Meaningless (and skipped) unless `items` is itself an
//! array of schemas.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::{InstancePath, PathGuard};

struct AdditionalItemsValidator {
    tuple_len: usize,
    node: Box<dyn ValidatorNode>,
}

impl ValidatorNode for AdditionalItemsValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        let items = value.as_array()?;
        items.iter().enumerate().skip(self.tuple_len).find_map(|(index, item)| {
            let mut guard = PathGuard::new(path, index);
            self.node.validate(item, guard.path(), table)
        })
    }
}

pub(crate) fn compile(
    schema: &Map<String, Value>,
    value: &Value,
    compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    let tuple_len = match schema.get("items") {
        Some(Value::Array(schemas)) => schemas.len(),
        _ => return None,
    };
    let node = match compiler.compile_one(value) {
        Ok(node) => node,
        Err(e) => return Some(Err(e)),
    };
    Some(Ok(Box::new(AdditionalItemsValidator { tuple_len, node })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatRegistry;
    use crate::handlers::HandlerRegistry;
    use crate::resolver::Resolver;
    use serde_json::json;

    fn compile_additional(schema: Value) -> Option<Box<dyn ValidatorNode>> {
        let resolver = Resolver::new(&schema, HandlerRegistry::default()).unwrap();
        let mut compiler = Compiler::for_test(resolver, FormatRegistry::with_defaults());
        let obj = schema.as_object().unwrap().clone();
        let value = obj.get("additionalItems").unwrap().clone();
        compile(&obj, &value, &mut compiler).map(Result::unwrap)
    }

    #[test]
    fn false_rejects_extras_beyond_the_tuple() {
        let node = compile_additional(json!({"items": [{"type": "string"}], "additionalItems": false})).unwrap();
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!(["a"]), &mut path, &table).is_none());
        assert!(node.validate(&json!(["a", "extra"]), &mut path, &table).is_some());
    }

    #[test]
    fn absent_without_tuple_items_does_nothing() {
        assert!(compile_additional(json!({"items": {"type": "string"}, "additionalItems": false})).is_none());
    }
}
