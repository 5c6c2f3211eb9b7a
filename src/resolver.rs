//! Resolves `$ref`/`$id`, fetches remote schemas through the handler
//! registry, and exposes subschemas by absolute URI.
use std::sync::Arc;

use ahash::AHashMap;
use serde_json::{Map, Value};
use url::Url;

use crate::error::SchemaCompilationError;
use crate::handlers::HandlerRegistry;

/// The base URI assigned to a root schema that declares no `$id`.
const DEFAULT_ROOT_URI: &str = "json-schema:///";

fn without_fragment(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_fragment(None);
    url
}

fn schema_id(value: &Value) -> Option<&str> {
    value.as_object().and_then(|obj| obj.get("$id")).and_then(Value::as_str)
}

/// The structural children of a keyword's value that are themselves
/// schemas, per the walk rules: the active keyword set union `definitions`,
/// minus `const`/`enum`. `definitions`, `properties`, and `patternProperties`
/// are arbitrary-key maps; `dependencies` only contributes its schema-typed
/// values (array-typed values are data, not schemas).
fn schema_children<'a>(key: &str, value: &'a Value) -> Vec<&'a Value> {
    match key {
        "definitions" | "properties" | "patternProperties" => match value {
            Value::Object(map) => map.values().collect(),
            _ => Vec::new(),
        },
        "dependencies" => match value {
            Value::Object(map) => map
                .values()
                .filter(|v| matches!(v, Value::Object(_) | Value::Bool(_)))
                .collect(),
            _ => Vec::new(),
        },
        "allOf" | "anyOf" | "oneOf" => match value {
            Value::Array(items) => items.iter().collect(),
            _ => Vec::new(),
        },
        "items" => match value {
            Value::Array(items) => items.iter().collect(),
            Value::Object(_) | Value::Bool(_) => vec![value],
            _ => Vec::new(),
        },
        "additionalItems" | "additionalProperties" | "not" | "contains" | "propertyNames" | "if" | "then" | "else" => {
            match value {
                Value::Object(_) | Value::Bool(_) => vec![value],
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

/// JSON-pointer navigation into an already-resolved document, per RFC 6901.
fn json_pointer<'a>(document: &'a Value, pointer: &str) -> Option<&'a Value> {
    if pointer.is_empty() {
        return Some(document);
    }
    if !pointer.starts_with('/') {
        return None;
    }
    let mut current = document;
    for raw_segment in pointer[1..].split('/') {
        let segment = raw_segment.replace("~1", "/").replace("~0", "~");
        current = match current {
            Value::Object(map) => map.get(&segment)?,
            Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Resolution state for a single `compile` call: the scope stack, the cache
/// of fetched/walked documents, and the index of location-independent `$id`s.
/// Not shared once compilation returns.
pub(crate) struct Resolver {
    handlers: HandlerRegistry,
    documents: AHashMap<String, Arc<Value>>,
    ids: AHashMap<String, Arc<Value>>,
    scopes: Vec<Url>,
}

impl Resolver {
    pub(crate) fn new(root: &Value, handlers: HandlerRegistry) -> Result<Self, SchemaCompilationError> {
        let root_uri = match schema_id(root) {
            Some(id) => Url::parse(id).map_err(|e| SchemaCompilationError::InvalidSchemaUri {
                value: id.to_string(),
                reason: e.to_string(),
            })?,
            None => Url::parse(DEFAULT_ROOT_URI).expect("constant root URI is well-formed"),
        };
        let mut resolver = Resolver {
            handlers,
            documents: AHashMap::new(),
            ids: AHashMap::new(),
            scopes: vec![root_uri.clone()],
        };
        let root_arc = Arc::new(root.clone());
        resolver
            .documents
            .insert(without_fragment(&root_uri).to_string(), Arc::clone(&root_arc));
        resolver.ids.insert(root_uri.as_str().to_string(), Arc::clone(&root_arc));
        resolver.walk(root, &root_uri);
        Ok(resolver)
    }

    pub(crate) fn current_uri(&self) -> Url {
        self.scopes.last().cloned().expect("scope stack is never empty")
    }

    pub(crate) fn push_scope(&mut self, uri: Url) {
        self.scopes.push(uri);
    }

    pub(crate) fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    pub(crate) fn reset_scope(&mut self, uri: Url) {
        self.scopes = vec![uri];
    }

    /// Join a relative (or absolute) `$id`/`$ref` value against the current
    /// base URI. Pure: does not touch the document cache.
    pub(crate) fn join(&self, reference: &str) -> Result<Url, SchemaCompilationError> {
        let base = self.current_uri();
        Url::options()
            .base_url(Some(&base))
            .parse(reference)
            .map_err(|e| SchemaCompilationError::InvalidSchemaUri {
                value: reference.to_string(),
                reason: e.to_string(),
            })
    }

    /// Fetch (or retrieve from cache) the subschema addressed by an absolute
    /// URI: a document lookup (local, cached, or via a handler) followed by
    /// a JSON-pointer walk of the fragment, if any. Copies the fragment out
    /// of its document, matching the resolver's one-document-per-scheme
    /// ownership model.
    pub(crate) fn resolve_uri(&mut self, uri: &Url) -> Result<Arc<Value>, SchemaCompilationError> {
        if let Some(schema) = self.ids.get(uri.as_str()) {
            return Ok(Arc::clone(schema));
        }
        let doc_uri = without_fragment(uri);
        let document = self.load_document(&doc_uri)?;
        if let Some(schema) = self.ids.get(uri.as_str()) {
            // The walk triggered by `load_document` may have just registered
            // this exact URI as a location-independent `$id`.
            return Ok(Arc::clone(schema));
        }
        let fragment = uri.fragment().unwrap_or("");
        if fragment.is_empty() {
            return Ok(document);
        }
        let decoded = percent_encoding::percent_decode_str(fragment)
            .decode_utf8()
            .map_err(|_| SchemaCompilationError::UnresolvedReference { reference: uri.to_string() })?;
        json_pointer(&document, &decoded)
            .map(|value| Arc::new(value.clone()))
            .ok_or_else(|| SchemaCompilationError::UnresolvedReference { reference: uri.to_string() })
    }

    fn load_document(&mut self, doc_uri: &Url) -> Result<Arc<Value>, SchemaCompilationError> {
        let key = doc_uri.as_str().to_string();
        if let Some(document) = self.documents.get(&key) {
            return Ok(Arc::clone(document));
        }
        let handler = self
            .handlers
            .get(doc_uri.scheme())
            .ok_or_else(|| SchemaCompilationError::UnresolvedReference { reference: doc_uri.to_string() })?
            .clone();
        let value = handler(doc_uri.as_str())?;
        let document = Arc::new(value);
        self.documents.insert(key, Arc::clone(&document));
        self.walk(&document, doc_uri);
        Ok(document)
    }

    /// Visit every structural descendant of `value`, registering `$id`
    /// declarations relative to `base` as we go.
    fn walk(&mut self, value: &Value, base: &Url) {
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => return,
        };
        let scope = match obj.get("$id").and_then(Value::as_str) {
            Some(id) => match Url::options().base_url(Some(base)).parse(id) {
                Ok(new_base) => {
                    self.ids.insert(new_base.as_str().to_string(), Arc::new(value.clone()));
                    new_base
                }
                Err(_) => base.clone(),
            },
            None => base.clone(),
        };
        self.walk_object(obj, &scope);
    }

    fn walk_object(&mut self, obj: &Map<String, Value>, scope: &Url) {
        for (key, value) in obj {
            if key == "const" || key == "enum" {
                continue;
            }
            for child in schema_children(key, value) {
                self.walk(child, scope);
            }
        }
    }
}
