//! The polymorphic validator node: a trait object with a single method,
//! boxed behind `Arc` so compiled schemas can be cloned cheaply and shared
//! across threads.
use std::sync::Arc;

use ahash::AHashMap;
use serde_json::Value;

use crate::error::ValidationError;
use crate::paths::InstancePath;

/// The URI-keyed map every `IndirectNode` looks into at evaluation time.
/// Populated once, during compilation, and never mutated afterwards.
pub type SchemaTable = AHashMap<String, Arc<dyn ValidatorNode>>;

/// A compiled validator node. Implemented by every keyword validator plus
/// the handful of structural nodes below (`AcceptNode`, `RejectNode`,
/// `IndirectNode`, `ConjunctionNode`).
pub trait ValidatorNode: Send + Sync {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError>;
}

/// The validator for `true` and `{}`: accepts every instance.
pub struct AcceptNode;

impl ValidatorNode for AcceptNode {
    fn validate(&self, _value: &Value, _path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        None
    }
}

/// The validator for `false`: rejects every instance.
pub struct RejectNode;

impl ValidatorNode for RejectNode {
    fn validate(&self, value: &Value, path: &mut InstancePath, _table: &SchemaTable) -> Option<ValidationError> {
        Some(ValidationError::new(
            path.snapshot(),
            "false schema",
            format!("{} cannot satisfy the false schema", value),
        ))
    }
}

/// A node that defers to a URI-keyed table entry at evaluation time,
/// breaking the compile-time cycle a `$ref` would otherwise create.
pub struct IndirectNode {
    pub uri: String,
}

impl ValidatorNode for IndirectNode {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        let target = table
            .get(&self.uri)
            .unwrap_or_else(|| panic!("invariant violated: '{}' missing from compiled schema table", self.uri));
        target.validate(value, path, table)
    }
}

/// The conjunction of every keyword builder that fired for a schema object.
/// Evaluates children in the order the compiler collected them and stops at
/// the first failure.
pub struct ConjunctionNode {
    pub children: Vec<Box<dyn ValidatorNode>>,
}

impl ValidatorNode for ConjunctionNode {
    fn validate(&self, value: &Value, path: &mut InstancePath, table: &SchemaTable) -> Option<ValidationError> {
        self.children.iter().find_map(|child| child.validate(value, path, table))
    }
}
