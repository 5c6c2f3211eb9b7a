//! `type`: membership in one of the seven JSON Schema type domains.
use std::convert::TryFrom;

use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;

struct TypeValidator {
    expected: Vec<PrimitiveType>,
    raw: String,
}

impl ValidatorNode for TypeValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        let actual = PrimitiveType::of(value);
        if self.expected.iter().any(|t| actual.contains(t)) {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "type",
                format!("{} is not of type '{}'", value, self.raw),
            ))
        }
    }
}

fn parse_name(name: &str) -> Result<PrimitiveType, SchemaCompilationError> {
    PrimitiveType::try_from(name).map_err(|_| SchemaCompilationError::SchemaMalformed {
        at: format!("type: '{}' is not a recognized type name", name),
    })
}

pub(crate) fn compile(
    _schema: &Map<String, Value>,
    value: &Value,
    _compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    let (expected, raw) = match value {
        Value::String(name) => match parse_name(name) {
            Ok(t) => (vec![t], name.clone()),
            Err(e) => return Some(Err(e)),
        },
        Value::Array(items) => {
            let mut expected = Vec::with_capacity(items.len());
            let mut names = Vec::with_capacity(items.len());
            for item in items {
                let name = match item.as_str() {
                    Some(name) => name,
                    None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "type".to_string() })),
                };
                match parse_name(name) {
                    Ok(t) => {
                        expected.push(t);
                        names.push(name.to_string());
                    }
                    Err(e) => return Some(Err(e)),
                }
            }
            (expected, names.join("/"))
        }
        _ => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "type".to_string() })),
    };
    Some(Ok(Box::new(TypeValidator { expected, raw })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatRegistry;
    use crate::handlers::HandlerRegistry;
    use crate::node::SchemaTable as Table;
    use crate::resolver::Resolver;
    use serde_json::json;
    use test_case::test_case;

    fn compile_type(schema: Value) -> (Box<dyn ValidatorNode>, Table) {
        let resolver = Resolver::new(&schema, HandlerRegistry::default()).unwrap();
        let mut compiler = Compiler::for_test(resolver, FormatRegistry::with_defaults());
        let obj = schema.as_object().unwrap().clone();
        let value = obj.get("type").unwrap().clone();
        let node = compile(&obj, &value, &mut compiler).unwrap().unwrap();
        (node, Table::default())
    }

    #[test_case(json!({"type": "string"}), json!("x"), true; "string matches string")]
    #[test_case(json!({"type": "string"}), json!(1), false; "number fails string")]
    #[test_case(json!({"type": "integer"}), json!(1.0), true; "integral float satisfies integer")]
    #[test_case(json!({"type": "integer"}), json!(1.5), false; "fractional float fails integer")]
    #[test_case(json!({"type": "number"}), json!(true), false; "boolean never satisfies number")]
    #[test_case(json!({"type": ["string", "null"]}), json!(null), true; "list of types")]
    fn type_checks(schema: Value, instance: Value, expected: bool) {
        let (node, table) = compile_type(schema);
        let mut path = InstancePath::new();
        assert_eq!(node.validate(&instance, &mut path, &table).is_none(), expected);
    }
}
