//! A JSON Schema Draft-07 compiler and validator.
//!
//! ```
//! use serde_json::json;
//! use schema7::Schema7;
//!
//! let schema = Schema7::compile(&json!({"type": "string", "minLength": 3})).unwrap();
//! assert!(schema.is_valid(&json!("hello")));
//! assert!(!schema.is_valid(&json!("hi")));
//! ```
mod compiler;
pub mod error;
mod formats;
mod handlers;
mod keywords;
mod node;
pub mod paths;
mod options;
mod primitive_type;
mod registry;
mod resolver;
mod strict;

pub use error::{SchemaCompilationError, ValidationError};
pub use options::CompileOptions;

use std::sync::Arc;

use serde_json::Value;

use node::{SchemaTable, ValidatorNode};
use paths::InstancePath;

/// A compiled, immutable Draft-07 validator. Cheap to clone (an `Arc` to
/// the root node plus an `Arc`-valued table); safe to share across threads
/// and to call concurrently on disjoint instances.
#[derive(Clone)]
pub struct Schema7 {
    root: Arc<dyn ValidatorNode>,
    table: SchemaTable,
}

impl Schema7 {
    /// Compile `schema` with the default format and handler registries.
    pub fn compile(schema: &Value) -> Result<Schema7, SchemaCompilationError> {
        CompileOptions::default().compile(schema)
    }

    /// Start a builder to register custom formats/handlers before compiling.
    pub fn options() -> CompileOptions {
        CompileOptions::new()
    }

    /// Validate `instance`, returning the first failing keyword's error, if
    /// any. `is_valid(x) ⇔ validate(x).is_ok()` holds by construction: both
    /// drive the same validator graph.
    pub fn validate(&self, instance: &Value) -> Result<(), ValidationError> {
        let mut path = InstancePath::new();
        match self.root.validate(instance, &mut path, &self.table) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validate(instance).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn is_valid_and_validate_agree() {
        let schema = Schema7::compile(&json!({"type": "integer", "multipleOf": 3})).unwrap();
        assert_eq!(schema.is_valid(&json!(-9)), schema.validate(&json!(-9)).is_ok());
        assert_eq!(schema.is_valid(&json!(-8)), schema.validate(&json!(-8)).is_ok());
    }

    #[test]
    fn recompiling_is_deterministic() {
        let schema_json = json!({
            "type": "object",
            "required": ["name"],
            "properties": {"name": {"type": "string"}}
        });
        let first = Schema7::compile(&schema_json).unwrap();
        let second = Schema7::compile(&schema_json).unwrap();
        let instance = json!({"name": 5});
        assert_eq!(first.validate(&instance), second.validate(&instance));
    }
}
