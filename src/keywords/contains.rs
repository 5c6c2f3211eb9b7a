//! `contains`: at least one array element must satisfy the given schema.
//! Draft-07 doesn't define `minContains`/`maxContains`, but honors them
//! when present to bound how many elements may match.
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::{InstancePath, PathGuard};
use crate::primitive_type::PrimitiveType;

struct ContainsValidator {
    node: Box<dyn ValidatorNode>,
    min: u64,
    max: Option<u64>,
}

impl ValidatorNode for ContainsValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        let items = value.as_array()?;
        let matches = items
            .iter()
            .enumerate()
            .filter(|(index, item)| {
                let mut guard = PathGuard::new(path, *index);
                self.node.validate(item, guard.path(), table).is_none()
            })
            .count() as u64;
        if matches < self.min {
            return Some(ValidationError::new(
                path.snapshot(),
                "contains",
                format!("array has {} matching elements, needs at least {}", matches, self.min),
            ));
        }
        if let Some(max) = self.max {
            if matches > max {
                return Some(ValidationError::new(
                    path.snapshot(),
                    "contains",
                    format!("array has {} matching elements, allows at most {}", matches, max),
                ));
            }
        }
        None
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
    let node = match compiler.compile_one(value) {
        Ok(node) => node,
        Err(e) => return Some(Err(e)),
    };
    let min = schema.get("minContains").and_then(Value::as_u64).unwrap_or(1);
    let max = schema.get("maxContains").and_then(Value::as_u64);
    Some(Ok(Box::new(ContainsValidator { node, min, max })))
}
