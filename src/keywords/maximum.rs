//! `maximum`: an inclusive upper bound on a number, compared without
//! round-tripping through `f64` when either side is an exact integer.
use num_cmp::NumCmp;
use serde_json::{Map, Number, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;

struct MaximumValidator {
    limit: Number,
}

impl MaximumValidator {
    fn satisfies(&self, item: &Number) -> bool {
        if let Some(item) = item.as_u64() {
            !is_greater_than(item, &self.limit)
        } else if let Some(item) = item.as_i64() {
            !is_greater_than(item, &self.limit)
        } else {
            let item = item.as_f64().expect("serde_json numbers always have an f64 projection");
            !is_greater_than(item, &self.limit)
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

impl ValidatorNode for MaximumValidator {
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
                "maximum",
                format!("{} is greater than the maximum of {}", number, self.limit),
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
        _ => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "maximum".to_string() })),
    };
    Some(Ok(Box::new(MaximumValidator { limit })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_values_above_the_limit() {
        let node = MaximumValidator { limit: Number::from(10) };
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!(10), &mut path, &table).is_none());
        assert!(node.validate(&json!(11), &mut path, &table).is_some());
    }

    #[test]
    fn large_integers_compare_without_precision_loss() {
        let limit = 1_u64 << 54;
        let node = MaximumValidator { limit: Number::from(limit) };
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!(limit + 1), &mut path, &table).is_some());
        assert!(node.validate(&json!(limit), &mut path, &table).is_none());
    }
}
