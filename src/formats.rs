//! The `format` registry: a name → predicate map, seeded with the Draft-07
//! built-ins this crate can implement without reaching outside the
//! dependency stack, and open to caller overrides via `CompileOptions::with_format`.
use std::collections::HashMap;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use url::Url;

lazy_static::lazy_static! {
    static ref IRI_REFERENCE_RE: Regex =
        Regex::new(r"^(\w+:(/?/?))?[^#\\\s]*(#[^\\\s]*)?\z").expect("built-in regex is valid");
    static ref JSON_POINTER_RE: Regex =
        Regex::new(r"^(/(([^/~])|(~[01]))*)*\z").expect("built-in regex is valid");
    static ref RELATIVE_JSON_POINTER_RE: Regex =
        Regex::new(r"^(?:0|[1-9][0-9]*)(?:#|(?:/(?:[^~/]|~0|~1)*)*)\z").expect("built-in regex is valid");
    static ref TIME_RE: Regex = Regex::new(
        r"^([01][0-9]|2[0-3]):([0-5][0-9]):([0-5][0-9])(\.[0-9]{6})?(([Zz])|([+\-]([01][0-9]|2[0-3]):[0-5][0-9]))\z",
    ).expect("built-in regex is valid");
    static ref URI_TEMPLATE_RE: Regex = Regex::new(
        r#"^(?:(?:[^\x00-\x20"'<>%\\^`{|}]|%[0-9a-f]{2})|\{[+#./;?&=,!@|]?(?:[a-z0-9_]|%[0-9a-f]{2})+(?::[1-9][0-9]{0,3}|\*)?(?:,(?:[a-z0-9_]|%[0-9a-f]{2})+(?::[1-9][0-9]{0,3}|\*)?)*})*\z"#
    ).expect("built-in regex is valid");
}

fn check_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn check_date_time(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
}

fn check_time(value: &str) -> bool {
    TIME_RE.is_match(value)
}

fn check_email(value: &str) -> bool {
    value.contains('@')
}

fn check_hostname(value: &str) -> bool {
    !(value.ends_with('-')
        || value.starts_with('-')
        || value.is_empty()
        || value.chars().count() > 255
        || value.chars().any(|c| !(c.is_alphanumeric() || c == '-' || c == '.'))
        || value.split('.').any(|part| part.chars().count() > 63))
}

fn check_ipv4(value: &str) -> bool {
    matches!(IpAddr::from_str(value), Ok(IpAddr::V4(_)))
}

fn check_ipv6(value: &str) -> bool {
    matches!(IpAddr::from_str(value), Ok(IpAddr::V6(_)))
}

fn check_uri(value: &str) -> bool {
    Url::from_str(value).is_ok()
}

fn check_iri(value: &str) -> bool {
    Url::from_str(value).is_ok()
}

fn check_uri_reference(value: &str) -> bool {
    IRI_REFERENCE_RE.is_match(value)
}

fn check_json_pointer(value: &str) -> bool {
    JSON_POINTER_RE.is_match(value)
}

fn check_relative_json_pointer(value: &str) -> bool {
    RELATIVE_JSON_POINTER_RE.is_match(value)
}

fn check_regex(value: &str) -> bool {
    Regex::new(value).is_ok()
}

fn check_uri_template(value: &str) -> bool {
    URI_TEMPLATE_RE.is_match(value)
}

/// A boxed string predicate, cheap to clone since the registry hands out
/// `Arc`s rather than owning a `Box` per lookup.
pub type FormatCheck = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// `name -> predicate`. Immutable once compilation starts; built fresh per
/// `CompileOptions` so callers can add or override entries without touching
/// a process-global table.
#[derive(Clone)]
pub struct FormatRegistry {
    checks: HashMap<String, FormatCheck>,
}

impl FormatRegistry {
    pub fn with_defaults() -> Self {
        let mut checks: HashMap<String, FormatCheck> = HashMap::new();
        checks.insert("date".into(), Arc::new(check_date));
        checks.insert("date-time".into(), Arc::new(check_date_time));
        checks.insert("time".into(), Arc::new(check_time));
        checks.insert("email".into(), Arc::new(check_email));
        checks.insert("hostname".into(), Arc::new(check_hostname));
        checks.insert("ipv4".into(), Arc::new(check_ipv4));
        checks.insert("ipv6".into(), Arc::new(check_ipv6));
        checks.insert("uri".into(), Arc::new(check_uri));
        checks.insert("uri-reference".into(), Arc::new(check_uri_reference));
        checks.insert("uri-template".into(), Arc::new(check_uri_template));
        checks.insert("iri".into(), Arc::new(check_iri));
        checks.insert("iri-reference".into(), Arc::new(check_uri_reference));
        checks.insert("json-pointer".into(), Arc::new(check_json_pointer));
        checks.insert("relative-json-pointer".into(), Arc::new(check_relative_json_pointer));
        checks.insert("regex".into(), Arc::new(check_regex));
        FormatRegistry { checks }
    }

    pub fn insert(&mut self, name: impl Into<String>, check: impl Fn(&str) -> bool + Send + Sync + 'static) {
        self.checks.insert(name.into(), Arc::new(check));
    }

    pub fn get(&self, name: &str) -> Option<&FormatCheck> {
        self.checks.get(name)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        FormatRegistry::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("2021-01-05", true; "valid date")]
    #[test_case("not-a-date", false; "garbage")]
    fn date_format(value: &str, expected: bool) {
        let registry = FormatRegistry::with_defaults();
        let check = registry.get("date").unwrap();
        assert_eq!(check(value), expected);
    }

    #[test]
    fn override_replaces_builtin() {
        let mut registry = FormatRegistry::with_defaults();
        registry.insert("email", |s: &str| s == "only-this@example.com");
        let check = registry.get("email").unwrap();
        assert!(!check("other@example.com"));
        assert!(check("only-this@example.com"));
    }

    #[test]
    fn unknown_format_is_absent() {
        let registry = FormatRegistry::with_defaults();
        assert!(registry.get("made-up").is_none());
    }
}
