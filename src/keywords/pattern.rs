//! `pattern`: a regular expression that must find a match somewhere in
//! the string (an unanchored search, not a full-match).
use regex::Regex;
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::keywords::keyword_applies;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;
use crate::primitive_type::PrimitiveType;

struct PatternValidator {
    regex: Regex,
    raw: String,
}

impl ValidatorNode for PatternValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        let s = value.as_str()?;
        if self.regex.is_match(s) {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "pattern",
                format!("{:?} does not match pattern '{}'", s, self.raw),
            ))
        }
    }
}

pub(crate) fn compile(
    schema: &Map<String, Value>,
    value: &Value,
    _compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    if !keyword_applies(schema, &[PrimitiveType::String]) {
        return None;
    }
    let raw = match value.as_str() {
        Some(s) => s.to_string(),
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "pattern".to_string() })),
    };
    let regex = match Regex::new(&raw) {
        Ok(re) => re,
        Err(e) => {
            return Some(Err(SchemaCompilationError::InvalidPattern {
                pattern: raw,
                reason: e.to_string(),
            }))
        }
    };
    Some(Ok(Box::new(PatternValidator { regex, raw })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_is_unanchored() {
        let node = PatternValidator { regex: Regex::new("bar").unwrap(), raw: "bar".to_string() };
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&serde_json::json!("foobarbaz"), &mut path, &table).is_none());
        assert!(node.validate(&serde_json::json!("foobaz"), &mut path, &table).is_some());
    }

    #[test]
    fn invalid_regex_fails_compilation() {
        let schema = serde_json::json!({"pattern": "("}).as_object().unwrap().clone();
        let resolver = crate::resolver::Resolver::new(&Value::Object(schema.clone()), crate::handlers::HandlerRegistry::default()).unwrap();
        let mut compiler = Compiler::for_test(resolver, crate::formats::FormatRegistry::with_defaults());
        let result = compile(&schema, schema.get("pattern").unwrap(), &mut compiler).unwrap();
        assert!(matches!(result, Err(SchemaCompilationError::InvalidPattern { .. })));
    }
}
