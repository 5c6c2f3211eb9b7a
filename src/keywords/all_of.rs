//! `allOf`: every subschema must accept the instance; reports the first
//! failing child.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;

struct AllOfValidator {
    nodes: Vec<Box<dyn ValidatorNode>>,
}

impl ValidatorNode for AllOfValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        self.nodes.iter().find_map(|node| node.validate(value, path, table))
    }
}

pub(crate) fn compile(
    _schema: &Map<String, Value>,
    value: &Value,
    compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    let schemas = match value.as_array() {
        Some(items) => items,
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "allOf".to_string() })),
    };
    let mut nodes = Vec::with_capacity(schemas.len());
    for child in schemas {
        match compiler.compile_one(child) {
            Ok(node) => nodes.push(node),
            Err(e) => return Some(Err(e)),
        }
    }
    Some(Ok(Box::new(AllOfValidator { nodes })))
}
