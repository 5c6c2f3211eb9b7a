//! The public builder: configure formats and remote handlers, then compile.
use serde_json::Value;

use crate::compiler;
use crate::error::SchemaCompilationError;
use crate::formats::FormatRegistry;
use crate::handlers::HandlerRegistry;
use crate::Schema7;

/// Accumulates format and handler overrides before compiling a schema.
pub struct CompileOptions {
    formats: FormatRegistry,
    handlers: HandlerRegistry,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            formats: FormatRegistry::with_defaults(),
            handlers: HandlerRegistry::with_defaults(),
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        CompileOptions::default()
    }

    /// Register or override a `format` predicate.
    pub fn with_format(mut self, name: impl Into<String>, check: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.formats.insert(name, check);
        self
    }

    /// Register or override a remote `$ref` scheme handler.
    pub fn with_handler(
        mut self,
        scheme: impl Into<String>,
        handler: impl Fn(&str) -> Result<Value, SchemaCompilationError> + Send + Sync + 'static,
    ) -> Self {
        self.handlers.insert(scheme, handler);
        self
    }

    /// Drive compilation to a fixed point and return the immutable
    /// validator.
    pub fn compile(self, schema: &Value) -> Result<Schema7, SchemaCompilationError> {
        let (root, table) = compiler::compile(schema, self.formats, self.handlers)?;
        Ok(Schema7 { root, table })
    }
}
