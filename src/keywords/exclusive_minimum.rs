//! `exclusiveMinimum`: a strict lower bound on a number, compared without
//! round-tripping through `f64` when either side is an exact integer.
use num_cmp::NumCmp;
use serde_json::{Map, Number, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;

struct ExclusiveMinimumValidator {
    limit: Number,
}

impl ExclusiveMinimumValidator {
    fn satisfies(&self, item: &Number) -> bool {
        if let Some(item) = item.as_u64() {
            is_greater_than(item, &self.limit)
        } else if let Some(item) = item.as_i64() {
            is_greater_than(item, &self.limit)
        } else {
            let item = item.as_f64().expect("serde_json numbers always have an f64 projection");
            is_greater_than(item, &self.limit)
        }
    }
}

fn is_greater_than<T: NumCmp<u64> + NumCmp<i64> + NumCmp<f64> + Copy>(item: T, limit: &Number) -> bool {
    if let Some(limit) = limit.as_u64() {
        NumCmp::num_gt(item, limit)
    } else if let Some(limit) = limit.as_i64() {
        NumCmp::num_gt(item, limit)
    } else {
        NumCmp::num_gt(item, limit.as_f64().expect("serde_json numbers always have an f64 projection"))
    }
}

impl ValidatorNode for ExclusiveMinimumValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        let number = match value {
            Value::Number(n) => n,
            _ => return None,
        };
        if self.satisfies(number) {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "exclusiveMinimum",
                format!("{} is not strictly greater than {}", number, self.limit),
            ))
        }
    }
}

pub(crate) fn compile(
    schema: &Map<String, Value>,
    value: &Value,
    _compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    if !keyword_applies(schema, &[PrimitiveType::Number, PrimitiveType::Integer]) {
        return None;
    }
    let limit = match value {
        Value::Number(n) => n.clone(),
        _ => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "exclusiveMinimum".to_string() })),
    };
    Some(Ok(Box::new(ExclusiveMinimumValidator { limit })))
}
