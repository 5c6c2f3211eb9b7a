//! Error types surfaced by compilation and validation.
//!
//! `SchemaCompilationError` is fatal and returned from `compile`.
//! `ValidationError` is the single, first-failure-wins error `validate`
//! returns; there is no accumulation in this crate.
use std::fmt;

/// Fatal, compile-time failures.
#[derive(Debug)]
pub enum SchemaCompilationError {
    /// A `$ref` could not be located: no handler matches its scheme, or the
    /// JSON-pointer fragment does not exist in the resolved document.
    UnresolvedReference { reference: String },
    /// A schema value is neither a boolean nor an object.
    SchemaMalformed { at: String },
    /// A remote handler was invoked and returned an error.
    HandlerFailure { uri: String, reason: String },
    /// A `$ref`/`$id` value is not a usable URI reference.
    InvalidSchemaUri { value: String, reason: String },
    /// A `pattern`/`patternProperties` key is not a valid regular
    /// expression.
    InvalidPattern { pattern: String, reason: String },
}

impl fmt::Display for SchemaCompilationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaCompilationError::UnresolvedReference { reference } => {
                write!(f, "unresolved reference '{}'", reference)
            }
            SchemaCompilationError::SchemaMalformed { at } => {
                write!(f, "schema at '{}' is neither a boolean nor an object", at)
            }
            SchemaCompilationError::HandlerFailure { uri, reason } => {
                write!(f, "handler for '{}' failed: {}", uri, reason)
            }
            SchemaCompilationError::InvalidSchemaUri { value, reason } => {
                write!(f, "'{}' is not a valid URI reference: {}", value, reason)
            }
            SchemaCompilationError::InvalidPattern { pattern, reason } => {
                write!(f, "'{}' is not a valid regular expression: {}", pattern, reason)
            }
        }
    }
}

impl std::error::Error for SchemaCompilationError {}

impl From<url::ParseError> for SchemaCompilationError {
    fn from(error: url::ParseError) -> Self {
        SchemaCompilationError::InvalidSchemaUri {
            value: String::new(),
            reason: error.to_string(),
        }
    }
}

/// A single validation failure: the path to the offending value, a
/// human-readable message, and the name of the keyword that rejected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub path: Vec<String>,
    pub message: String,
    pub keyword: String,
}

impl ValidationError {
    pub fn new(path: Vec<String>, keyword: &str, message: impl Into<String>) -> Self {
        ValidationError {
            path,
            keyword: keyword.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path.join("/"), self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path_when_present() {
        let error = ValidationError::new(vec!["status".into()], "enum", "'gone' is not one of the allowed values");
        assert_eq!(
            error.to_string(),
            "status: 'gone' is not one of the allowed values"
        );
    }

    #[test]
    fn display_without_path() {
        let error = ValidationError::new(vec![], "type", "1 is not of type 'string'");
        assert_eq!(error.to_string(), "1 is not of type 'string'");
    }
}
