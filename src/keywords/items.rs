//! `items`: either a single schema applied to every element, or a tuple of
//! schemas applied positionally (Draft-07 tuple validation). Elements past
//! the tuple's length are left to `additionalItems`.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::{InstancePath, PathGuard};
use crate::primitive_type::PrimitiveType;

enum Shape {
    Single(Box<dyn ValidatorNode>),
    Tuple(Vec<Box<dyn ValidatorNode>>),
}

struct ItemsValidator {
    shape: Shape,
}

impl ValidatorNode for ItemsValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        let items = value.as_array()?;
        match &self.shape {
            Shape::Single(node) => items.iter().enumerate().find_map(|(index, item)| {
                let mut guard = PathGuard::new(path, index);
                node.validate(item, guard.path(), table)
            }),
            Shape::Tuple(nodes) => items.iter().zip(nodes.iter()).enumerate().find_map(|(index, (item, node))| {
                let mut guard = PathGuard::new(path, index);
                node.validate(item, guard.path(), table)
            }),
        }
    }
}

pub(crate) fn compile(
    schema: &Map<String, Value>,
    value: &Value,
    compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    if !keyword_applies(schema, &[PrimitiveType::Array]) {
        return None;
    }
    let shape = match value {
        Value::Array(schemas) => {
            let mut nodes = Vec::with_capacity(schemas.len());
            for child in schemas {
                match compiler.compile_one(child) {
                    Ok(node) => nodes.push(node),
                    Err(e) => return Some(Err(e)),
                }
            }
            Shape::Tuple(nodes)
        }
        other => match compiler.compile_one(other) {
            Ok(node) => Shape::Single(node),
            Err(e) => return Some(Err(e)),
        },
    };
    Some(Ok(Box::new(ItemsValidator { shape })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatRegistry;
    use crate::handlers::HandlerRegistry;
    use crate::resolver::Resolver;
    use serde_json::json;

    fn compile_items(schema: Value) -> Box<dyn ValidatorNode> {
        let resolver = Resolver::new(&schema, HandlerRegistry::default()).unwrap();
        let mut compiler = Compiler::for_test(resolver, FormatRegistry::with_defaults());
        let obj = schema.as_object().unwrap().clone();
        let value = obj.get("items").unwrap().clone();
        compile(&obj, &value, &mut compiler).unwrap().unwrap()
    }

    #[test]
    fn single_schema_applies_to_every_element() {
        let node = compile_items(json!({"items": {"type": "string"}}));
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!(["a", "b"]), &mut path, &table).is_none());
        assert!(node.validate(&json!(["a", 1]), &mut path, &table).is_some());
    }

    #[test]
    fn tuple_schemas_apply_positionally() {
        let node = compile_items(json!({"items": [{"type": "string"}, {"type": "integer"}]}));
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!(["a", 1, "whatever-goes-here"]), &mut path, &table).is_none());
        assert!(node.validate(&json!([1, "a"]), &mut path, &table).is_some());
    }
}
