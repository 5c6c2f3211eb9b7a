//! `required`: every named key must be present on the instance.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;

struct RequiredValidator {
    names: Vec<String>,
}

impl ValidatorNode for RequiredValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        let object = value.as_object()?;
        self.names.iter().find(|name| !object.contains_key(name.as_str())).map(|missing| {
            ValidationError::new(path.snapshot(), "required", format!("'{}' is a required property", missing))
        })
    }
}

pub(crate) fn compile(
    _schema: &Map<String, Value>,
    value: &Value,
    _compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    let names = match value.as_array() {
        Some(items) => {
            let mut names = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(s) => names.push(s.to_string()),
                    None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "required".to_string() })),
                }
            }
            names
        }
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "required".to_string() })),
    };
    if names.is_empty() {
        return None;
    }
    Some(Ok(Box::new(RequiredValidator { names })))
}
