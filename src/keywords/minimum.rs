//! `minimum`: an inclusive lower bound on a number, compared without
//! round-tripping through `f64` when either side is an exact integer.
use num_cmp::NumCmp;
use serde_json::{Map, Number, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;

struct MinimumValidator {
    limit: Number,
}

impl MinimumValidator {
    fn satisfies(&self, item: &Number) -> bool {
        if let Some(item) = item.as_u64() {
            !is_less_than(item, &self.limit)
        } else if let Some(item) = item.as_i64() {
            !is_less_than(item, &self.limit)
        } else {
            let item = item.as_f64().expect("serde_json numbers always have an f64 projection");
            !is_less_than(item, &self.limit)
        }
    }
}

fn is_less_than<T: NumCmp<u64> + NumCmp<i64> + NumCmp<f64> + Copy>(item: T, limit: &Number) -> bool {
    if let Some(limit) = limit.as_u64() {
        NumCmp::num_lt(item, limit)
    } else if let Some(limit) = limit.as_i64() {
        NumCmp::num_lt(item, limit)
    } else {
        NumCmp::num_lt(item, limit.as_f64().expect("serde_json numbers always have an f64 projection"))
    }
}

impl ValidatorNode for MinimumValidator {
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
                "minimum",
                format!("{} is less than the minimum of {}", number, self.limit),
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
        _ => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "minimum".to_string() })),
    };
    Some(Ok(Box::new(MinimumValidator { limit })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_values_below_the_limit() {
        let node = MinimumValidator { limit: Number::from(1) };
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!(0), &mut path, &table).is_some());
        assert!(node.validate(&json!(1), &mut path, &table).is_none());
    }

    #[test]
    fn large_integers_compare_without_precision_loss() {
        let limit = (1_u64 << 54) + 1;
        let node = MinimumValidator { limit: Number::from(limit) };
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!(limit - 1), &mut path, &table).is_some());
        assert!(node.validate(&json!(limit), &mut path, &table).is_none());
    }
}
