//! `properties`: named keys satisfy their corresponding subschema.
use ahash::AHashMap;
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::{InstancePath, PathGuard};
use crate::primitive_type::PrimitiveType;

struct PropertiesValidator {
    nodes: AHashMap<String, Box<dyn ValidatorNode>>,
}

impl ValidatorNode for PropertiesValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        let object = value.as_object()?;
        object.iter().find_map(|(key, item)| {
            let node = self.nodes.get(key)?;
            let mut guard = PathGuard::new(path, key.as_str());
            node.validate(item, guard.path(), table)
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
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "properties".to_string() })),
    };
    let mut nodes = AHashMap::default();
    for (key, child) in map {
        match compiler.compile_one(child) {
            Ok(node) => {
                nodes.insert(key.clone(), node);
            }
            Err(e) => return Some(Err(e)),
        }
    }
    Some(Ok(Box::new(PropertiesValidator { nodes })))
}
