//! Schema-driven validator
//!
//! Generic over [`FormSchema`]: no field-specific branches live here. Every
//! field runs its rule chain in declaration order and reports only the first
//! failing rule. Fields are independent of each other except for
//! `Rule::EqualsField`, which reads the *raw* value of the referenced field
//! whether or not that field is valid itself.

use super::schema::{compiled_pattern, FieldSchema, FormSchema, Rule};
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Read access to raw field values by name
pub trait FieldLookup {
    fn lookup(&self, name: &str) -> Option<&str>;
}

impl<K, V> FieldLookup for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(|v| v.as_ref())
    }
}

impl<K, V> FieldLookup for HashMap<K, V>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
{
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(|v| v.as_ref())
    }
}

/// Error message attached to one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Per-field errors of one validator run, in schema order.
/// Fields without an entry are valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.error(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Names of the fields that failed
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.iter().map(|e| e.field)
    }
}

/// Validate every field of `schema` against `values`.
/// Missing values are treated as empty strings.
pub fn validate(schema: &FormSchema, values: &impl FieldLookup) -> ValidationResult {
    debug_assert_eq!(schema.check(), Ok(()), "malformed schema `{}`", schema.name);

    let errors = schema
        .fields
        .iter()
        .filter_map(|field| {
            validate_field(field, values).map(|message| FieldError {
                field: field.name,
                message,
            })
        })
        .collect();

    ValidationResult { errors }
}

/// Run one field's rule chain; returns the first failing rule's message
pub fn validate_field(field: &FieldSchema, values: &impl FieldLookup) -> Option<String> {
    let value = values.lookup(field.name).unwrap_or("");

    // Optional fields left blank skip their whole chain
    if value.is_empty() && !field.is_required() {
        return None;
    }

    field
        .rules
        .iter()
        .find(|check| !rule_holds(field, &check.rule, value, values))
        .map(|check| check.render_message())
}

fn rule_holds(field: &FieldSchema, rule: &Rule, value: &str, values: &impl FieldLookup) -> bool {
    match *rule {
        Rule::Required => !value.is_empty(),
        Rule::Contains(needle) => value.contains(needle),
        Rule::Pattern(pattern) => match compiled_pattern(pattern) {
            Ok(re) => re.is_match(value),
            Err(e) => {
                debug_assert!(false, "field `{}`: invalid pattern `{}`: {}", field.name, pattern, e);
                log::error!("field `{}`: invalid pattern `{}`: {}", field.name, pattern, e);
                false
            }
        },
        Rule::MinLength(min) => value.chars().count() >= min,
        Rule::MaxLength(max) => value.chars().count() <= max,
        Rule::ExactLength(len) => value.chars().count() == len,
        Rule::Digits => value.chars().all(|c| c.is_ascii_digit()),
        Rule::EqualsField(other) => values.lookup(other).unwrap_or("") == value,
        Rule::OneOf(choices) => choices.iter().any(|choice| *choice == value),
    }
}
