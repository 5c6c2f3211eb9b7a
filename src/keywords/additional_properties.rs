//! `additionalProperties`: applies to instance keys not named in
//! `properties` and not matched by any `patternProperties` regex.
use regex::Regex;
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::{InstancePath, PathGuard};
use crate::primitive_type::PrimitiveType;

struct AdditionalPropertiesValidator {
    known: Vec<String>,
    patterns: Vec<Regex>,
    node: Box<dyn ValidatorNode>,
}

impl AdditionalPropertiesValidator {
    fn is_extra(&self, key: &str) -> bool {
        !self.known.iter().any(|name| name == key) && !self.patterns.iter().any(|re| re.is_match(key))
    }
}

impl ValidatorNode for AdditionalPropertiesValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        let object = value.as_object()?;
        object.iter().filter(|(key, _)| self.is_extra(key)).find_map(|(key, item)| {
            let mut guard = PathGuard::new(path, key.as_str());
            self.node.validate(item, guard.path(), table)
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
    let known = schema
        .get("properties")
        .and_then(Value::as_object)
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    let mut patterns = Vec::new();
    if let Some(map) = schema.get("patternProperties").and_then(Value::as_object) {
        for pattern in map.keys() {
            match Regex::new(pattern) {
                Ok(re) => patterns.push(re),
                Err(e) => {
                    return Some(Err(SchemaCompilationError::InvalidPattern {
                        pattern: pattern.clone(),
                        reason: e.to_string(),
                    }))
                }
            }
        }
    }
    let node = match compiler.compile_one(value) {
        Ok(node) => node,
        Err(e) => return Some(Err(e)),
    };
    Some(Ok(Box::new(AdditionalPropertiesValidator { known, patterns, node })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatRegistry;
    use crate::handlers::HandlerRegistry;
    use crate::resolver::Resolver;
    use serde_json::json;

    fn compile_additional(schema: Value) -> Box<dyn ValidatorNode> {
        let resolver = Resolver::new(&schema, HandlerRegistry::default()).unwrap();
        let mut compiler = Compiler::for_test(resolver, FormatRegistry::with_defaults());
        let obj = schema.as_object().unwrap().clone();
        let value = obj.get("additionalProperties").unwrap().clone();
        compile(&obj, &value, &mut compiler).unwrap().unwrap()
    }

    #[test]
    fn false_rejects_keys_outside_properties_and_patterns() {
        let node = compile_additional(json!({
            "properties": {"name": {"type": "string"}},
            "patternProperties": {"^S_": {}},
            "additionalProperties": false
        }));
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!({"name": "a", "S_extra": 1}), &mut path, &table).is_none());
        assert!(node.validate(&json!({"other": 1}), &mut path, &table).is_some());
    }

    #[test]
    fn schema_form_validates_extra_values() {
        let node = compile_additional(json!({
            "properties": {"name": {}},
            "additionalProperties": {"type": "integer"}
        }));
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!({"name": "a", "count": 1}), &mut path, &table).is_none());
        assert!(node.validate(&json!({"name": "a", "count": "x"}), &mut path, &table).is_some());
    }
}
