//! `anyOf`: at least one subschema must accept the instance; on total
//! failure, the error concatenates every child's message.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;

struct AnyOfValidator {
    nodes: Vec<Box<dyn ValidatorNode>>,
}

impl ValidatorNode for AnyOfValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        let failures: Vec<String> = self
            .nodes
            .iter()
            .filter_map(|node| node.validate(value, path, table))
            .map(|error| error.message)
            .collect();
        if failures.len() < self.nodes.len() {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "anyOf",
                format!("{} does not satisfy any subschema: {}", value, failures.join("; ")),
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
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "anyOf".to_string() })),
    };
    let mut nodes = Vec::with_capacity(schemas.len());
    for child in schemas {
        match compiler.compile_one(child) {
            Ok(node) => nodes.push(node),
            Err(e) => return Some(Err(e)),
        }
    }
    Some(Ok(Box::new(AnyOfValidator { nodes })))
}
