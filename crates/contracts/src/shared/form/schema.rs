//! Declarative field schema for multi-step forms
//!
//! A schema is plain static data: the field list, the ordered rule chain of
//! every field and the keystroke pre-filter. All types use 'static lifetimes
//! so a whole form can be declared as a `static` item.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use thiserror::Error;

// ============================================================================
// Rules
// ============================================================================

/// A single validation rule. The rules of a field run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must be non-empty
    Required,
    /// Value must contain the given substring
    Contains(&'static str),
    /// Value must match the regular expression (anchors are up to the pattern)
    Pattern(&'static str),
    MinLength(usize),
    MaxLength(usize),
    ExactLength(usize),
    /// Value must consist of ASCII digits only
    Digits,
    /// Value must equal the raw value of another field
    EqualsField(&'static str),
    /// Value must be one of the listed identifiers
    OneOf(&'static [&'static str]),
}

impl Rule {
    /// Numeric parameter substituted for `{len}` in error messages
    pub fn length_param(&self) -> Option<usize> {
        match self {
            Self::MinLength(n) | Self::MaxLength(n) | Self::ExactLength(n) => Some(*n),
            _ => None,
        }
    }
}

/// Rule paired with the message shown when it fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleCheck {
    pub rule: Rule,
    pub message: &'static str,
}

impl RuleCheck {
    pub const fn new(rule: Rule, message: &'static str) -> Self {
        Self { rule, message }
    }

    /// Message with `{len}` replaced by the rule's length parameter
    pub fn render_message(&self) -> String {
        match self.rule.length_param() {
            Some(n) => self.message.replace("{len}", &n.to_string()),
            None => self.message.to_string(),
        }
    }
}

// ============================================================================
// Input pre-filter
// ============================================================================

/// Character class allowed at input time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharClass {
    #[default]
    Any,
    Digits,
}

impl CharClass {
    pub fn allows(&self, c: char) -> bool {
        match self {
            Self::Any => true,
            Self::Digits => c.is_ascii_digit(),
        }
    }
}

/// Keystroke pre-filter. Rejects raw input that can never become valid.
/// This is a UX aid only; acceptance is always decided by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFilter {
    pub max_length: Option<usize>,
    pub charset: CharClass,
}

impl InputFilter {
    pub const fn none() -> Self {
        Self {
            max_length: None,
            charset: CharClass::Any,
        }
    }

    pub const fn digits(max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
            charset: CharClass::Digits,
        }
    }

    pub fn accepts(&self, raw: &str) -> bool {
        if let Some(max) = self.max_length {
            if raw.chars().count() > max {
                return false;
            }
        }
        raw.chars().all(|c| self.charset.allows(c))
    }
}

// ============================================================================
// Field and form schema
// ============================================================================

/// Kind of input widget the render layer should use for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Password,
    Select,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Select => "select",
        }
    }
}

/// Choice offered by a select field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Static description of one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub rules: &'static [RuleCheck],
    pub filter: InputFilter,
    pub options: &'static [SelectOption],
}

impl FieldSchema {
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|check| check.rule == Rule::Required)
    }
}

/// The fixed field set of one form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSchema],
}

impl FormSchema {
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        let fields: &'static [FieldSchema] = self.fields;
        fields.iter().map(|f| f.name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Verify the schema is internally consistent
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in self.fields {
            if !seen.insert(field.name) {
                return Err(SchemaError::DuplicateField(field.name));
            }
        }

        for field in self.fields {
            for check in field.rules {
                match check.rule {
                    Rule::EqualsField(target) if self.index_of(target).is_none() => {
                        return Err(SchemaError::UnknownReference {
                            field: field.name,
                            target,
                        });
                    }
                    Rule::Pattern(pattern) => {
                        compiled_pattern(pattern).map_err(|e| SchemaError::InvalidPattern {
                            field: field.name,
                            pattern,
                            reason: e.to_string(),
                        })?;
                    }
                    Rule::OneOf(choices) if choices.is_empty() => {
                        return Err(SchemaError::EmptyChoices(field.name));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }
}

/// Schema defects. These are programming errors, surfaced by `FormSchema::check`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate field `{0}`")]
    DuplicateField(&'static str),

    #[error("field `{field}` is compared against unknown field `{target}`")]
    UnknownReference {
        field: &'static str,
        target: &'static str,
    },

    #[error("field `{field}` has invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        field: &'static str,
        pattern: &'static str,
        reason: String,
    },

    #[error("field `{0}` offers no choices")]
    EmptyChoices(&'static str),
}

static PATTERN_CACHE: Lazy<Mutex<HashMap<&'static str, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Compile a schema pattern once per process
pub(crate) fn compiled_pattern(pattern: &'static str) -> Result<Regex, regex::Error> {
    let mut cache = PATTERN_CACHE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(re) = cache.get(pattern) {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    cache.insert(pattern, re.clone());
    Ok(re)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECKS: &[RuleCheck] = &[
        RuleCheck::new(Rule::Required, "required"),
        RuleCheck::new(Rule::ExactLength(4), "must have {len} numbers"),
    ];

    static BROKEN_REFERENCE: FormSchema = FormSchema {
        name: "broken",
        fields: &[FieldSchema {
            name: "confirm",
            label: "Confirm",
            input: InputKind::Text,
            rules: &[RuleCheck::new(Rule::EqualsField("missing"), "mismatch")],
            filter: InputFilter::none(),
            options: &[],
        }],
    };

    static BROKEN_PATTERN: FormSchema = FormSchema {
        name: "broken",
        fields: &[FieldSchema {
            name: "code",
            label: "Code",
            input: InputKind::Text,
            rules: &[RuleCheck::new(Rule::Pattern("[0-9"), "bad")],
            filter: InputFilter::none(),
            options: &[],
        }],
    };

    #[test]
    fn test_render_message_substitutes_length() {
        assert_eq!(CHECKS[1].render_message(), "must have 4 numbers");
        assert_eq!(CHECKS[0].render_message(), "required");
    }

    #[test]
    fn test_digit_filter() {
        let filter = InputFilter::digits(3);
        assert!(filter.accepts(""));
        assert!(filter.accepts("123"));
        assert!(!filter.accepts("1234"));
        assert!(!filter.accepts("12a"));
        assert!(InputFilter::none().accepts("anything at all"));
    }

    #[test]
    fn test_check_reports_unknown_reference() {
        assert_eq!(
            BROKEN_REFERENCE.check(),
            Err(SchemaError::UnknownReference {
                field: "confirm",
                target: "missing"
            })
        );
    }

    #[test]
    fn test_check_reports_invalid_pattern() {
        assert!(matches!(
            BROKEN_PATTERN.check(),
            Err(SchemaError::InvalidPattern { field: "code", .. })
        ));
    }
}
