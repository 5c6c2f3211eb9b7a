//! One module per Draft-07 keyword. Each exposes a single `compile`
//! function matching `registry::Builder`: given the enclosing schema
//! object, this keyword's own value, and the in-progress `Compiler`,
//! return `None` if the keyword contributes no runtime work for this
//! schema, or `Some(Ok(node))`/`Some(Err(_))` otherwise.
use std::convert::TryFrom;

use serde_json::{Map, Value};

use crate::primitive_type::PrimitiveType;

pub(crate) mod additional_items;
pub(crate) mod additional_properties;
pub(crate) mod all_of;
pub(crate) mod any_of;
pub(crate) mod const_;
pub(crate) mod contains;
pub(crate) mod dependencies;
pub(crate) mod enum_;
pub(crate) mod exclusive_maximum;
pub(crate) mod exclusive_minimum;
pub(crate) mod format;
pub(crate) mod if_;
pub(crate) mod items;
pub(crate) mod max_items;
pub(crate) mod max_length;
pub(crate) mod max_properties;
pub(crate) mod maximum;
pub(crate) mod min_items;
pub(crate) mod min_length;
pub(crate) mod min_properties;
pub(crate) mod minimum;
pub(crate) mod multiple_of;
pub(crate) mod not;
pub(crate) mod one_of;
pub(crate) mod pattern;
pub(crate) mod pattern_properties;
pub(crate) mod properties;
pub(crate) mod property_names;
pub(crate) mod required;
pub(crate) mod type_;
pub(crate) mod unique_items;

/// Does the enclosing schema's `type` keyword leave room for `domain`? The
/// Draft-07 `type` value is either a single type name or a list of them;
/// only when it is present and *disjoint* from `domain` does the keyword
/// contribute nothing. Any other shape (absent, a subset, a superset, an
/// unrecognized name) leaves the door open, so the caller still builds a
/// node. This is a compile-time shortcut only: every leaf validator still
/// inline-matches on the instance's own JSON type and is a no-op outside
/// its domain regardless.
pub(crate) fn keyword_applies(schema: &Map<String, Value>, domain: &[PrimitiveType]) -> bool {
    let declared = match schema.get("type") {
        None => return true,
        Some(Value::String(name)) => match PrimitiveType::try_from(name.as_str()) {
            Ok(t) => vec![t],
            Err(_) => return true,
        },
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|name| PrimitiveType::try_from(name).ok())
            .collect::<Vec<_>>(),
        Some(_) => return true,
    };
    if declared.is_empty() {
        return true;
    }
    declared.iter().any(|t| domain.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn absent_type_always_applies() {
        assert!(keyword_applies(&schema(json!({})), &[PrimitiveType::String]));
    }

    #[test]
    fn disjoint_type_does_not_apply() {
        assert!(!keyword_applies(&schema(json!({"type": "integer"})), &[PrimitiveType::String]));
    }

    #[test]
    fn overlapping_list_applies() {
        assert!(keyword_applies(
            &schema(json!({"type": ["integer", "string"]})),
            &[PrimitiveType::String]
        ));
    }
}
