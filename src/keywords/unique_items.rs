//! `uniqueItems`: when `true`, no two elements of the array may be
//! strictly equal to each other. Reuses the hash-indexed membership
//! technique from `enum_`: every JSON value is hashable under
//! `StrictValue`, so there is no linear-scan fallback to maintain.
use std::hash::{Hash, Hasher};

use ahash::{AHashMap, AHasher};
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;
use crate::strict::StrictValue;

fn strict_hash(value: &Value) -> u64 {
    let mut hasher = AHasher::default();
    StrictValue::new(value).hash(&mut hasher);
    hasher.finish()
}

struct UniqueItemsValidator;

impl ValidatorNode for UniqueItemsValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        let items = value.as_array()?;
        let mut seen: AHashMap<u64, Vec<usize>> = AHashMap::new();
        for (index, item) in items.iter().enumerate() {
            let hash = strict_hash(item);
            let candidates = seen.entry(hash).or_default();
            let instance = StrictValue::new(item);
            if candidates.iter().any(|&seen_index| StrictValue::new(&items[seen_index]) == instance) {
                return Some(ValidationError::new(
                    path.snapshot(),
                    "uniqueItems",
                    format!("array has duplicate items at index {}", index),
                ));
            }
            candidates.push(index);
        }
        None
    }
}

pub(crate) fn compile(
    schema: &Map<String, Value>,
    value: &Value,
    _compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    if !keyword_applies(schema, &[PrimitiveType::Array]) {
        return None;
    }
    match value {
        Value::Bool(true) => Some(Ok(Box::new(UniqueItemsValidator))),
        Value::Bool(false) => None,
        _ => Some(Err(SchemaCompilationError::SchemaMalformed { at: "uniqueItems".to_string() })),
    }
}
