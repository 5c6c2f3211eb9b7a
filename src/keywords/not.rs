//! `not`: the instance must fail the given subschema.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;

struct NotValidator {
    node: Box<dyn ValidatorNode>,
}

impl ValidatorNode for NotValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        if self.node.validate(value, path, table).is_some() {
            None
        } else {
            Some(ValidationError::new(path.snapshot(), "not", format!("{} should not be valid", value)))
        }
    }
}

pub(crate) fn compile(
    _schema: &Map<String, Value>,
    value: &Value,
    compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    let node = match compiler.compile_one(value) {
        Ok(node) => node,
        Err(e) => return Some(Err(e)),
    };
    Some(Ok(Box::new(NotValidator { node })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatRegistry;
    use crate::handlers::HandlerRegistry;
    use crate::resolver::Resolver;
    use serde_json::json;

    #[test]
    fn inverts_the_child_result() {
        let schema = json!({"not": {"type": "string"}});
        let resolver = Resolver::new(&schema, HandlerRegistry::default()).unwrap();
        let mut compiler = Compiler::for_test(resolver, FormatRegistry::with_defaults());
        let obj = schema.as_object().unwrap().clone();
        let value = obj.get("not").unwrap().clone();
        let node = compile(&obj, &value, &mut compiler).unwrap().unwrap();
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!(1), &mut path, &table).is_none());
        assert!(node.validate(&json!("x"), &mut path, &table).is_some());
    }
}
