//! `dependencies`: presence of one key can require either a set of sibling
//! keys (array form) or that the whole object satisfy another schema
//! (schema form).
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;

enum Requirement {
    Names(Vec<String>),
    Schema(Box<dyn ValidatorNode>),
}

struct DependenciesValidator {
    entries: Vec<(String, Requirement)>,
}

impl ValidatorNode for DependenciesValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        let object = value.as_object()?;
        self.entries.iter().filter(|(name, _)| object.contains_key(name.as_str())).find_map(|(name, req)| {
            let failure = match req {
                Requirement::Names(names) => {
                    let missing = names.iter().find(|n| !object.contains_key(n.as_str()))?;
                    format!("'{}' is a required property", missing)
                }
                Requirement::Schema(node) => node.validate(value, path, table)?.message,
            };
            Some(ValidationError::new(
                path.snapshot(),
                "dependencies",
                format!("dependency for '{}' not satisfied: {}", name, failure),
            ))
        })
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
    let map = match value.as_object() {
        Some(map) => map,
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "dependencies".to_string() })),
    };
    let mut entries = Vec::with_capacity(map.len());
    for (name, requirement) in map {
        let parsed = match requirement {
            Value::Array(items) => {
                let mut names = Vec::with_capacity(items.len());
                for item in items {
                    match item.as_str() {
                        Some(s) => names.push(s.to_string()),
                        None => {
                            return Some(Err(SchemaCompilationError::SchemaMalformed { at: "dependencies".to_string() }))
                        }
                    }
                }
                Requirement::Names(names)
            }
            other => match compiler.compile_one(other) {
                Ok(node) => Requirement::Schema(node),
                Err(e) => return Some(Err(e)),
            },
        };
        entries.push((name.clone(), parsed));
    }
    Some(Ok(Box::new(DependenciesValidator { entries })))
}
