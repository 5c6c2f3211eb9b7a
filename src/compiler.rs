//! Drives compilation to a fixed point: a work queue of absolute URIs,
//! popped one at a time, each compiled into a validator node and recorded
//! in the shared schema table.
use std::collections::VecDeque;
use std::sync::Arc;

use ahash::AHashSet;
use serde_json::Value;
use url::Url;

use crate::error::SchemaCompilationError;
use crate::formats::FormatRegistry;
use crate::handlers::HandlerRegistry;
use crate::node::{AcceptNode, ConjunctionNode, IndirectNode, RejectNode, SchemaTable, ValidatorNode};
use crate::registry;
use crate::resolver::Resolver;

/// Per-`compile` call state: the resolver, the format registry every
/// `format`-keyword builder consults, and the compile-time work queue.
/// Dropped once `compile` returns; nothing here survives into the
/// published validator.
pub(crate) struct Compiler {
    pub(crate) resolver: Resolver,
    pub(crate) formats: FormatRegistry,
    queue: VecDeque<Url>,
    seen: AHashSet<String>,
    table: SchemaTable,
}

impl Compiler {
    /// Build a `Compiler` directly, bypassing `compile`'s work-queue loop.
    /// Only used by keyword modules' own unit tests, which need a live
    /// `Compiler` to exercise a single builder in isolation.
    #[cfg(test)]
    pub(crate) fn for_test(resolver: Resolver, formats: FormatRegistry) -> Self {
        Compiler {
            resolver,
            formats,
            queue: VecDeque::new(),
            seen: AHashSet::default(),
            table: SchemaTable::default(),
        }
    }

    /// Push `scope` (if any), run `f`, then pop it, regardless of whether
    /// `f` succeeded: an explicit push/call/pop rather than a `Drop` guard,
    /// since the guarded region spans a recursive call to `f` that itself
    /// borrows `&mut self`.
    fn with_scope<T>(
        &mut self,
        scope: Option<Url>,
        f: impl FnOnce(&mut Self) -> Result<T, SchemaCompilationError>,
    ) -> Result<T, SchemaCompilationError> {
        if let Some(uri) = scope {
            self.resolver.push_scope(uri);
            let result = f(self);
            self.resolver.pop_scope();
            result
        } else {
            f(self)
        }
    }

    /// Compile a single subschema value into a validator node, per the
    /// compile-one algorithm: accept/reject shortcuts, `$ref` indirection
    /// (which suppresses sibling keywords), or a conjunction of every
    /// registered keyword's contribution.
    pub(crate) fn compile_one(&mut self, schema: &Value) -> Result<Box<dyn ValidatorNode>, SchemaCompilationError> {
        match schema {
            Value::Bool(true) => Ok(Box::new(AcceptNode)),
            Value::Bool(false) => Ok(Box::new(RejectNode)),
            Value::Object(obj) if obj.is_empty() => Ok(Box::new(AcceptNode)),
            Value::Object(obj) => {
                if let Some(reference) = obj.get("$ref").and_then(Value::as_str) {
                    let absolute = self.resolver.join(reference)?;
                    let key = absolute.as_str().to_string();
                    if !self.seen.contains(&key) {
                        self.seen.insert(key.clone());
                        self.queue.push_back(absolute);
                    }
                    return Ok(Box::new(IndirectNode { uri: key }));
                }
                let id_scope = obj
                    .get("$id")
                    .and_then(Value::as_str)
                    .map(|id| self.resolver.join(id))
                    .transpose()?;
                self.with_scope(id_scope, |compiler| {
                    let mut children: Vec<Box<dyn ValidatorNode>> = Vec::new();
                    for (keyword, value) in obj {
                        if let Some(builder) = registry::lookup(keyword) {
                            if let Some(node) = builder(obj, value, compiler) {
                                children.push(node?);
                            }
                        }
                    }
                    Ok(Box::new(ConjunctionNode { children }) as Box<dyn ValidatorNode>)
                })
            }
            other => Err(SchemaCompilationError::SchemaMalformed { at: other.to_string() }),
        }
    }
}

/// Compile a root schema to a fixed point: seed the queue with the root
/// URI, repeatedly pop/enter-scope/compile/record, and return the root
/// node plus the full table every `IndirectNode` can look into.
pub(crate) fn compile(
    root: &Value,
    formats: FormatRegistry,
    handlers: HandlerRegistry,
) -> Result<(Arc<dyn ValidatorNode>, SchemaTable), SchemaCompilationError> {
    if !matches!(root, Value::Bool(_) | Value::Object(_)) {
        return Err(SchemaCompilationError::SchemaMalformed { at: "#".to_string() });
    }
    let resolver = Resolver::new(root, handlers)?;
    let root_uri = resolver.current_uri();
    let root_key = root_uri.as_str().to_string();

    let mut compiler = Compiler {
        resolver,
        formats,
        queue: VecDeque::new(),
        seen: AHashSet::default(),
        table: SchemaTable::default(),
    };
    compiler.seen.insert(root_key.clone());
    compiler.queue.push_back(root_uri);

    while let Some(uri) = compiler.queue.pop_front() {
        compiler.resolver.reset_scope(uri.clone());
        let schema = compiler.resolver.resolve_uri(&uri)?;
        let node: Arc<dyn ValidatorNode> = Arc::from(compiler.compile_one(&schema)?);
        compiler.table.insert(uri.as_str().to_string(), node);
    }

    let root_node = Arc::clone(
        compiler
            .table
            .get(&root_key)
            .expect("root URI is always compiled before the queue drains"),
    );
    Ok((root_node, compiler.table))
}
