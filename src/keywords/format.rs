//! `format`: a named semantic check, resolved against the compiler's
//! format registry at compile time so validation never touches it again.
use serde_json::{Map, Value};

use ahash::AHashSet;
use parking_lot::Mutex;

use crate::compiler::Compiler;
use crate::error::{SchemaCompilationError, ValidationError};
use crate::formats::FormatCheck;
use crate::node::{SchemaTable, ValidatorNode};
use crate::paths::InstancePath;

lazy_static::lazy_static! {
    static ref WARNED: Mutex<AHashSet<String>> = Mutex::new(AHashSet::default());
}

fn warn_once(name: &str) {
    let mut warned = WARNED.lock();
    if warned.insert(name.to_string()) {
        log::warn!("unrecognized format '{}', treating it as always valid", name);
    }
}

struct KnownFormatValidator {
    name: String,
    check: FormatCheck,
}

impl ValidatorNode for KnownFormatValidator {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        let s = value.as_str()?;
        if (self.check)(s) {
            None
        } else {
            Some(ValidationError::new(
                path.snapshot(),
                "format",
                format!("{:?} is not a valid '{}'", s, self.name),
            ))
        }
    }
}

struct UnknownFormatValidator;

impl ValidatorNode for UnknownFormatValidator {
    fn validate(&self, _value: &Value, _path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        None
    }
}

pub(crate) fn compile(
    _schema: &Map<String, Value>,
    value: &Value,
    compiler: &mut Compiler,
) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>> {
    let name = match value.as_str() {
        Some(name) => name,
        None => return Some(Err(SchemaCompilationError::SchemaMalformed { at: "format".to_string() })),
    };
    match compiler.formats.get(name) {
        Some(check) => Some(Ok(Box::new(KnownFormatValidator { name: name.to_string(), check: check.clone() }))),
        None => {
            warn_once(name);
            Some(Ok(Box::new(UnknownFormatValidator)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatRegistry;
    use crate::handlers::HandlerRegistry;
    use crate::resolver::Resolver;
    use serde_json::json;

    fn compile_format(schema: Value) -> Box<dyn ValidatorNode> {
        let resolver = Resolver::new(&schema, HandlerRegistry::default()).unwrap();
        let mut compiler = Compiler::for_test(resolver, FormatRegistry::with_defaults());
        let obj = schema.as_object().unwrap().clone();
        let value = obj.get("format").unwrap().clone();
        compile(&obj, &value, &mut compiler).unwrap().unwrap()
    }

    #[test]
    fn known_format_checks_the_predicate() {
        let node = compile_format(json!({"format": "date"}));
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!("2021-01-05"), &mut path, &table).is_none());
        assert!(node.validate(&json!("not-a-date"), &mut path, &table).is_some());
    }

    #[test]
    fn unknown_format_always_passes() {
        let node = compile_format(json!({"format": "made-up-format"}));
        let mut path = InstancePath::new();
        let table = SchemaTable::default();
        assert!(node.validate(&json!("anything"), &mut path, &table).is_none());
    }
}
