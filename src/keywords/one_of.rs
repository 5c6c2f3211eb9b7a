//! `oneOf`: exactly one subschema must accept the instance.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;

struct OneOfValidator {
    nodes: Vec<Box<dyn ValidatorNode>>,
}

impl ValidatorNode for OneOfValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        let passed = self.nodes.iter().filter(|node| node.validate(value, path, table).is_none()).count();
        if passed == 1 {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "oneOf",
                format!("{} satisfies {} subschemas, expected exactly 1", value, passed),
            ))
        }
    }
}

pub(crate) fn compile(
    _schema: &Map<String, Value>,
    value: &Value,
    compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    let schemas = match value.as_array() {
        Some(items) => items,
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "oneOf".to_string() })),
    };
    let mut nodes = Vec::with_capacity(schemas.len());
    for child in schemas {
        match compiler.compile_one(child) {
            Ok(node) => nodes.push(node),
            Err(e) => return Some(Err(e)),
        }
    }
    Some(Ok(Box::new(OneOfValidator { nodes })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatRegistry;
    use crate::handlers::HandlerRegistry;
    use crate::resolver::Resolver;
    use serde_json::json;

    #[test]
    fn fails_when_more_than_one_subschema_matches() {
        let schema = json!({"oneOf": [{"required": ["s"]}, {"required": ["e"]}]});
        let resolver = Resolver::new(&schema, HandlerRegistry::default()).unwrap();
        let mut compiler = Compiler::for_test(resolver, FormatRegistry::with_defaults());
        let obj = schema.as_object().unwrap().clone();
        let value = obj.get("oneOf").unwrap().clone();
        let node = compile(&obj, &value, &mut compiler).unwrap().unwrap();
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!({"s": 1}), &mut path, &table).is_none());
        assert!(node.validate(&json!({"s": 1, "e": 1}), &mut path, &table).is_some());
        assert!(node.validate(&json!({}), &mut path, &table).is_some());
    }
}
