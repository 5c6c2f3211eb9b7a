//! `if`/`then`/`else`: evaluate `if`; apply `then` on success, `else`
//! otherwise. `then`/`else` are not independently registered keywords:
//! this builder consumes them directly from the enclosing schema.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;

fn is_trivial(value: &Value) -> bool {
    matches!(value, Value::Bool(true)) || matches!(value, Value::Object(obj) if obj.is_empty())
}

struct IfValidator {
    if_node: Box<dyn ValidatorNode>,
    then_node: Option<Box<dyn ValidatorNode>>,
    else_node: Option<Box<dyn ValidatorNode>>,
}

impl ValidatorNode for IfValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        if self.if_node.validate(value, path, table).is_none() {
            self.then_node.as_ref().and_then(|node| node.validate(value, path, table))
        } else {
            self.else_node.as_ref().and_then(|node| node.validate(value, path, table))
        }
    }
}

pub(crate) fn compile(
    schema: &Map<String, Value>,
    value: &Value,
    compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    let then_value = schema.get("then");
    let else_value = schema.get("else");
    let then_trivial = then_value.map_or(true, is_trivial);
    let else_trivial = else_value.map_or(true, is_trivial);
    if then_trivial && else_trivial {
        return None;
    }

    let if_node = match compiler.compile_one(value) {
        Ok(node) => node,
        Err(e) => return Some(Err(e)),
    };
    let then_node = match then_value.filter(|v| !is_trivial(v)) {
        Some(v) => match compiler.compile_one(v) {
            Ok(node) => Some(node),
            Err(e) => return Some(Err(e)),
        },
        None => None,
    };
    let else_node = match else_value.filter(|v| !is_trivial(v)) {
        Some(v) => match compiler.compile_one(v) {
            Ok(node) => Some(node),
            Err(e) => return Some(Err(e)),
        },
        None => None,
    };
    Some(Ok(Box::new(IfValidator { if_node, then_node, else_node })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatRegistry;
    use crate::handlers::HandlerRegistry;
    use crate::resolver::Resolver;
    use serde_json::json;

    fn compile_if(schema: Value) -> Option<Box<dyn ValidatorNode>> {
        let resolver = Resolver::new(&schema, HandlerRegistry::default()).unwrap();
        let mut compiler = Compiler::for_test(resolver, FormatRegistry::with_defaults());
        let obj = schema.as_object().unwrap().clone();
        let value = obj.get("if").unwrap().clone();
        compile(&obj, &value, &mut compiler).map(Result::unwrap)
    }

    #[test]
    fn dispatches_to_then_or_else() {
        let node = compile_if(json!({
            "if": {"properties": {"power": {"const": "gas"}}},
            "then": {"required": ["gas_tank"]},
            "else": {"required": ["battery"]}
        }))
        .unwrap();
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!({"power": "gas", "gas_tank": 1}), &mut path, &table).is_none());
        assert!(node.validate(&json!({"power": "gas"}), &mut path, &table).is_some());
        assert!(node.validate(&json!({"power": "electric", "battery": 1}), &mut path, &table).is_none());
    }

    #[test]
    fn trivial_branches_build_nothing() {
        assert!(compile_if(json!({"if": {"type": "string"}})).is_none());
    }
}
