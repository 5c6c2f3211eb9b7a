//! Strict JSON value equality, used by `enum`, `const`, and `uniqueItems`.
//!
//! `serde_json::Value`'s own `PartialEq` treats numbers purely numerically,
//! so `json!(1) == json!(1.0)` but `json!(true) != json!(1)` already holds
//! there. `Value`'s `Eq`/`Hash` aren't implemented at all (`f64` has no
//! total order), so values can't go in a `HashSet` directly. `StrictValue`
//! adds a total, hashable projection that keeps booleans and numerics
//! disjoint, matching `_StrictBool`/`_strict_bool_nested` in the original
//! implementation.
use serde_json::Value;
use std::hash::{Hash, Hasher};

/// A JSON value wrapped for strict, hashable comparison. `true` and `1`
/// project to different variants and are therefore neither equal nor
/// hash-collisions of each other.
#[derive(Debug, Clone)]
pub struct StrictValue<'a>(&'a Value);

impl<'a> StrictValue<'a> {
    pub fn new(value: &'a Value) -> Self {
        StrictValue(value)
    }
}

fn number_bits(value: &Value) -> Option<u64> {
    value.as_f64().map(f64::to_bits)
}

impl PartialEq for StrictValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Bool(_), _) | (_, Value::Bool(_)) => false,
            (Value::Number(_), Value::Number(_)) => number_bits(self.0) == number_bits(other.0),
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| StrictValue::new(x) == StrictValue::new(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| {
                        b.get(k)
                            .map_or(false, |other_v| StrictValue::new(v) == StrictValue::new(other_v))
                    })
            }
            (a, b) => a == b,
        }
    }
}

impl Eq for StrictValue<'_> {}

impl Hash for StrictValue<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0 {
            Value::Null => 0u8.hash(state),
            Value::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            Value::Number(_) => {
                2u8.hash(state);
                number_bits(self.0).hash(state);
            }
            Value::String(s) => {
                3u8.hash(state);
                s.hash(state);
            }
            // Arrays and objects are handled by the hashability probe in
            // `is_hashable` below; they never reach a `HashSet`, so this
            // arm only needs to be consistent with `eq`, not fast.
            Value::Array(items) => {
                4u8.hash(state);
                for item in items {
                    StrictValue::new(item).hash(state);
                }
            }
            Value::Object(map) => {
                5u8.hash(state);
                for (k, v) in map {
                    k.hash(state);
                    StrictValue::new(v).hash(state);
                }
            }
        }
    }
}

/// Arrays and objects are structurally hashable here (unlike Python dicts,
/// which raise `TypeError`). JSON has no `NaN` literal, so every `Value`
/// produced by a parser is hashable under this projection. Kept as its own
/// function, matching the source material's defensive split and guarding
/// against any future `Value` variant.
pub fn is_hashable(_value: &Value) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bool_and_number_are_distinct() {
        assert_ne!(StrictValue::new(&json!(true)), StrictValue::new(&json!(1)));
        assert_ne!(StrictValue::new(&json!(false)), StrictValue::new(&json!(0)));
        assert_eq!(StrictValue::new(&json!(true)), StrictValue::new(&json!(true)));
    }

    #[test]
    fn nested_containers_are_strict() {
        assert_ne!(
            StrictValue::new(&json!([true])),
            StrictValue::new(&json!([1]))
        );
        assert_eq!(
            StrictValue::new(&json!({"a": true})),
            StrictValue::new(&json!({"a": true}))
        );
    }

    #[test]
    fn numbers_compare_across_representations() {
        assert_eq!(StrictValue::new(&json!(1.0)), StrictValue::new(&json!(1)));
    }
}
