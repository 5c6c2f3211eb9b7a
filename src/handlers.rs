//! The remote `$ref` handler registry: `scheme -> (uri -> JSON)`. Consulted
//! only at compile time; never during validation.
use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::SchemaCompilationError;

pub type Handler = Arc<dyn Fn(&str) -> Result<Value, SchemaCompilationError> + Send + Sync>;

#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn with_defaults() -> Self {
        let mut handlers: HashMap<String, Handler> = HashMap::new();
        #[cfg(feature = "resolve-http")]
        {
            let http: Handler = Arc::new(fetch_http);
            handlers.insert("http".into(), Arc::clone(&http));
            handlers.insert("https".into(), http);
        }
        HandlerRegistry { handlers }
    }

    pub fn insert(
        &mut self,
        scheme: impl Into<String>,
        handler: impl Fn(&str) -> Result<Value, SchemaCompilationError> + Send + Sync + 'static,
    ) {
        self.handlers.insert(scheme.into(), Arc::new(handler));
    }

    pub fn get(&self, scheme: &str) -> Option<&Handler> {
        self.handlers.get(scheme)
    }
}

#[cfg(feature = "resolve-http")]
fn fetch_http(uri: &str) -> Result<Value, SchemaCompilationError> {
    reqwest::blocking::get(uri)
        .and_then(|response| response.json())
        .map_err(|error| SchemaCompilationError::HandlerFailure {
            uri: uri.to_string(),
            reason: error.to_string(),
        })
}
