//! `enum`: strict-equality membership in a fixed list of values.
use std::hash::{Hash, Hasher};

use ahash::{AHashMap, AHasher};
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::strict::StrictValue;

fn strict_hash(value: &Value) -> u64 {
    let mut hasher = AHasher::default();
    StrictValue::new(value).hash(&mut hasher);
    hasher.finish()
}

/// Every JSON value produced by a parser is hashable under `StrictValue`
/// (see `strict::is_hashable`), so membership always goes through the
/// hash-indexed map; there is no unhashable fallback left to implement.
struct EnumValidator {
    members: Vec<Value>,
    by_hash: AHashMap<u64, Vec<usize>>,
}

impl ValidatorNode for EnumValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        let instance = StrictValue::new(value);
        let matches = self
            .by_hash
            .get(&strict_hash(value))
            .map_or(false, |candidates| candidates.iter().any(|&i| StrictValue::new(&self.members[i]) == instance));
        if matches {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "enum",
                format!("{} is not one of the allowed values", value),
            ))
        }
    }
}

pub(crate) fn compile(
    _schema: &Map<String, Value>,
    value: &Value,
    _compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    let members = match value.as_array() {
        Some(items) => items.clone(),
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "enum".to_string() })),
    };
    let mut by_hash: AHashMap<u64, Vec<usize>> = AHashMap::new();
    for (index, member) in members.iter().enumerate() {
        by_hash.entry(strict_hash(member)).or_default().push(index);
    }
    Some(Ok(Box::new(EnumValidator { members, by_hash })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatRegistry;
    use crate::handlers::HandlerRegistry;
    use crate::resolver::Resolver;
    use serde_json::json;

    fn compile_enum(schema: Value) -> Box<dyn ValidatorNode> {
        let resolver = Resolver::new(&schema, HandlerRegistry::default()).unwrap();
        let mut compiler = Compiler::for_test(resolver, FormatRegistry::with_defaults());
        let obj = schema.as_object().unwrap().clone();
        let value = obj.get("enum").unwrap().clone();
        compile(&obj, &value, &mut compiler).unwrap().unwrap()
    }

    #[test]
    fn accepts_member() {
        let node = compile_enum(json!({"enum": ["available", "pending", "sold"]}));
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!("pending"), &mut path, &table).is_none());
        assert!(node.validate(&json!("gone"), &mut path, &table).is_some());
    }

    #[test]
    fn zero_is_rejected_against_boolean_member() {
        let node = compile_enum(json!({"enum": [false]}));
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!(0), &mut path, &table).is_some());
    }

    #[test]
    fn false_is_rejected_against_zero_member() {
        let node = compile_enum(json!({"enum": [0]}));
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!(false), &mut path, &table).is_some());
    }
}
