//! `patternProperties`: instance keys matching a regex (unanchored search)
//! satisfy the associated subschema. A key may match more than one
//! pattern, in which case it must satisfy all of them.
use regex::Regex;
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::{InstancePath, PathGuard};
use crate::primitive_type::PrimitiveType;

struct PatternPropertiesValidator {
    entries: Vec<(Regex, Box<dyn ValidatorNode>)>,
}

impl ValidatorNode for PatternPropertiesValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        let object = value.as_object()?;
        object.iter().find_map(|(key, item)| {
            self.entries.iter().filter(|(re, _)| re.is_match(key)).find_map(|(_, node)| {
                let mut guard = PathGuard::new(path, key.as_str());
                node.validate(item, guard.path(), table)
            })
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
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "patternProperties".to_string() })),
    };
    let mut entries = Vec::with_capacity(map.len());
    for (pattern, child) in map {
        let regex = match Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => {
                return Some(Err(SchemaCompilationError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                }))
            }
        };
        match compiler.compile_one(child) {
            Ok(node) => entries.push((regex, node)),
            Err(e) => return Some(Err(e)),
        }
    }
    Some(Ok(Box::new(PatternPropertiesValidator { entries })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatRegistry;
    use crate::handlers::HandlerRegistry;
    use crate::resolver::Resolver;
    use serde_json::json;

    fn compile_pattern_properties(schema: Value) -> Box<dyn ValidatorNode> {
        let resolver = Resolver::new(&schema, HandlerRegistry::default()).unwrap();
        let mut compiler = Compiler::for_test(resolver, FormatRegistry::with_defaults());
        let obj = schema.as_object().unwrap().clone();
        let value = obj.get("patternProperties").unwrap().clone();
        compile(&obj, &value, &mut compiler).unwrap().unwrap()
    }

    #[test]
    fn matching_keys_must_satisfy_their_schema() {
        let node = compile_pattern_properties(json!({"patternProperties": {"^S_": {"type": "string"}}}));
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!({"S_name": "ok", "other": 1}), &mut path, &table).is_none());
        assert!(node.validate(&json!({"S_name": 1}), &mut path, &table).is_some());
    }
}
