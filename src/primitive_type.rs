use serde_json::Value;
use std::{convert::TryFrom, fmt};

/// The seven JSON Schema type names. Kept as an enum, rather than matching on
/// the raw string everywhere, so `type` keyword failures and type-gate
/// derivation can't typo a domain name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveType::Array => write!(f, "array"),
            PrimitiveType::Boolean => write!(f, "boolean"),
            PrimitiveType::Integer => write!(f, "integer"),
            PrimitiveType::Null => write!(f, "null"),
            PrimitiveType::Number => write!(f, "number"),
            PrimitiveType::Object => write!(f, "object"),
            PrimitiveType::String => write!(f, "string"),
        }
    }
}

impl TryFrom<&str> for PrimitiveType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "array" => Ok(PrimitiveType::Array),
            "boolean" => Ok(PrimitiveType::Boolean),
            "integer" => Ok(PrimitiveType::Integer),
            "null" => Ok(PrimitiveType::Null),
            "number" => Ok(PrimitiveType::Number),
            "object" => Ok(PrimitiveType::Object),
            "string" => Ok(PrimitiveType::String),
            _ => Err(()),
        }
    }
}

impl PrimitiveType {
    /// The JSON Schema types an instance satisfies. An instance can satisfy
    /// both `number` and `integer` (an integer-valued float does), but never
    /// `boolean` together with either, even though some runtimes treat
    /// `true`/`false` as `1`/`0` numerically.
    pub fn of(value: &Value) -> Vec<PrimitiveType> {
        match value {
            Value::Null => vec![PrimitiveType::Null],
            Value::Bool(_) => vec![PrimitiveType::Boolean],
            Value::String(_) => vec![PrimitiveType::String],
            Value::Array(_) => vec![PrimitiveType::Array],
            Value::Object(_) => vec![PrimitiveType::Object],
            Value::Number(n) => {
                let is_integer = n.is_u64() || n.is_i64() || n.as_f64().map_or(false, |f| f.fract() == 0.0);
                if is_integer {
                    vec![PrimitiveType::Number, PrimitiveType::Integer]
                } else {
                    vec![PrimitiveType::Number]
                }
            }
        }
    }

    pub fn matches(value: &Value, expected: PrimitiveType) -> bool {
        PrimitiveType::of(value).contains(&expected)
    }
}
