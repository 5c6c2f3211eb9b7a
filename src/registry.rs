//! The process-wide keyword registry: camelCase keyword name -> builder
//! function pointer. Built once, behind a `lazy_static`, and read-only
//! thereafter, satisfying the "keyword registry is write-once" contract.
use ahash::AHashMap;
use serde_json::{Map, Value};

use crate::compiler::Compiler;
use crate::error::SchemaCompilationError;
use crate::node::ValidatorNode;
use crate::keywords;

/// `builder(schema, this-keyword's-value, compiler) -> validator-node | absent`.
/// `schema` is the whole enclosing schema object, so a builder can consult
/// sibling keywords (`type`, for type-gating; `properties`/`patternProperties`,
/// for `additionalProperties`'s exclusion set).
pub(crate) type Builder =
    fn(&Map<String, Value>, &Value, &mut Compiler) -> Option<Result<Box<dyn ValidatorNode>, SchemaCompilationError>>;

lazy_static::lazy_static! {
    static ref REGISTRY: AHashMap<&'static str, Builder> = {
        let mut registry: AHashMap<&'static str, Builder> = AHashMap::new();
        registry.insert("type", keywords::type_::compile);
        registry.insert("enum", keywords::enum_::compile);
        registry.insert("const", keywords::const_::compile);
        registry.insert("minLength", keywords::min_length::compile);
        registry.insert("maxLength", keywords::max_length::compile);
        registry.insert("pattern", keywords::pattern::compile);
        registry.insert("format", keywords::format::compile);
        registry.insert("minimum", keywords::minimum::compile);
        registry.insert("maximum", keywords::maximum::compile);
        registry.insert("exclusiveMinimum", keywords::exclusive_minimum::compile);
        registry.insert("exclusiveMaximum", keywords::exclusive_maximum::compile);
        registry.insert("multipleOf", keywords::multiple_of::compile);
        registry.insert("minItems", keywords::min_items::compile);
        registry.insert("maxItems", keywords::max_items::compile);
        registry.insert("uniqueItems", keywords::unique_items::compile);
        registry.insert("items", keywords::items::compile);
        registry.insert("additionalItems", keywords::additional_items::compile);
        registry.insert("contains", keywords::contains::compile);
        registry.insert("minProperties", keywords::min_properties::compile);
        registry.insert("maxProperties", keywords::max_properties::compile);
        registry.insert("required", keywords::required::compile);
        registry.insert("properties", keywords::properties::compile);
        registry.insert("patternProperties", keywords::pattern_properties::compile);
        registry.insert("additionalProperties", keywords::additional_properties::compile);
        registry.insert("propertyNames", keywords::property_names::compile);
        registry.insert("dependencies", keywords::dependencies::compile);
        registry.insert("not", keywords::not::compile);
        registry.insert("allOf", keywords::all_of::compile);
        registry.insert("anyOf", keywords::any_of::compile);
        registry.insert("oneOf", keywords::one_of::compile);
        registry.insert("if", keywords::if_::compile);
        registry
    };
}

pub(crate) fn lookup(keyword: &str) -> Option<Builder> {
    REGISTRY.get(keyword).copied()
}
