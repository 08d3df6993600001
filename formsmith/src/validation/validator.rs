//! Runtime validators.
//!
//! A [`ValidationSchema`] is a tree of [`Validator`]s mirroring the form. It
//! validates the JSON value a form layer submits and reports every failing
//! check with its react-hook-form style path.

use std::sync::LazyLock;

use fancy_regex::Regex as PatternRegex;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{trace, warn};

use super::result::{FieldError, ValidationResult};

/// Email shape accepted by zod's `.email()`.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[A-Z0-9_'+-]\.?)*[A-Z0-9_+-]@(?:[A-Z0-9][A-Z0-9-]*\.)+[A-Z]{2,}$")
        .expect("EMAIL pattern failed")
});

/// A compiled `pattern` constraint that serializes as its source.
///
/// Patterns are written for JavaScript's `RegExp`, so look-around and
/// backreferences are supported.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: PatternRegex,
}

impl Pattern {
    /// Compile a pattern.
    pub fn new(source: &str) -> Result<Self, fancy_regex::Error> {
        Ok(Self {
            source: source.to_string(),
            regex: PatternRegex::new(source)?,
        })
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern matches anywhere in `value`. A match that
    /// exceeds the backtracking limit counts as no match.
    pub fn is_match(&self, value: &str) -> bool {
        match self.regex.is_match(value) {
            Ok(matched) => matched,
            Err(err) => {
                warn!(pattern = %self.source, error = %err, "pattern match aborted");
                false
            }
        }
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

/// Rules for text-like kinds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringRules {
    /// Reported for a missing or empty value.
    pub required_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    pub email: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
}

impl StringRules {
    /// A required string with no further checks.
    pub fn new(required_message: impl Into<String>) -> Self {
        Self {
            required_message: required_message.into(),
            min_length: None,
            max_length: None,
            email: false,
            pattern: None,
        }
    }
}

/// Rules for numbers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberRules {
    pub required_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// One named entry of an object validator.
#[derive(Debug, Clone, Serialize)]
pub struct FieldRule {
    pub name: String,
    pub validator: Validator,
}

/// Validator for an object keyed by field names.
///
/// Missing keys are validated as absent values. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectSchema {
    pub fields: Vec<FieldRule>,
}

impl ObjectSchema {
    /// Look up the validator of a field.
    pub fn field(&self, name: &str) -> Option<&Validator> {
        self.fields
            .iter()
            .find(|rule| rule.name == name)
            .map(|rule| &rule.validator)
    }

    fn check_map(&self, map: &Map<String, Value>, path: &str, errors: &mut Vec<FieldError>) {
        for rule in &self.fields {
            let child = join(path, &rule.name);
            rule.validator.check(map.get(&rule.name), &child, errors);
        }
    }
}

/// A composable validator node.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Validator {
    /// A string with optional bounds, email shape and pattern.
    String(StringRules),

    /// A number coerced from a JSON number or a numeric string.
    Number(NumberRules),

    /// A boolean. When `must_be_checked` is set, only `true` passes.
    #[serde(rename_all = "camelCase")]
    Boolean { must_be_checked: Option<String> },

    /// Exactly one of the listed strings.
    OneOf { label: String, options: Vec<String> },

    /// A list whose items all pass `item`.
    #[serde(rename_all = "camelCase")]
    Array {
        item: Box<Validator>,
        min_items: usize,
        min_items_message: String,
    },

    /// An object of named fields.
    Object(ObjectSchema),

    /// Accepts an absent value or `null`, and the empty string when
    /// `accepts_empty_string` is set. Anything else goes to `inner`.
    #[serde(rename_all = "camelCase")]
    Optional {
        inner: Box<Validator>,
        accepts_empty_string: bool,
    },
}

impl Validator {
    /// Validate a standalone value; errors are reported against `path`.
    pub fn validate(&self, value: &Value, path: &str) -> ValidationResult {
        let mut errors = Vec::new();
        self.check(Some(value), path, &mut errors);
        ValidationResult::from_errors(errors)
    }

    /// Whether the validator is an `Optional` wrapper.
    pub fn is_optional(&self) -> bool {
        matches!(self, Validator::Optional { .. })
    }

    fn check(&self, value: Option<&Value>, path: &str, errors: &mut Vec<FieldError>) {
        let value = match value {
            Some(Value::Null) | None => None,
            Some(v) => Some(v),
        };

        match self {
            Validator::Optional {
                inner,
                accepts_empty_string,
            } => match value {
                None => {
                    trace!(field = %path, "optional value absent");
                }
                Some(Value::String(s)) if *accepts_empty_string && s.is_empty() => {
                    trace!(field = %path, "optional value empty");
                }
                Some(v) => inner.check(Some(v), path, errors),
            },

            Validator::String(rules) => check_string(rules, value, path, errors),

            Validator::Number(rules) => check_number(rules, value, path, errors),

            Validator::Boolean { must_be_checked } => match (value, must_be_checked) {
                (Some(Value::Bool(true)), _) | (Some(Value::Bool(false)), None) => {}
                (Some(Value::Bool(false)), Some(message)) | (None, Some(message)) => {
                    errors.push(FieldError::must_be_checked(path, message.clone()))
                }
                (None, None) => errors.push(FieldError::invalid_type(path, "true or false")),
                (Some(_), _) => errors.push(FieldError::invalid_type(path, "true or false")),
            },

            Validator::OneOf { label, options } => match value {
                None => errors.push(FieldError::required(path, format!("{} is required", label))),
                Some(Value::String(s)) if options.iter().any(|o| o == s) => {}
                Some(_) => errors.push(FieldError::invalid_option(path, label)),
            },

            Validator::Array {
                item,
                min_items,
                min_items_message,
            } => match value {
                None => errors.push(FieldError::min_items(path, min_items_message.clone())),
                Some(Value::Array(items)) => {
                    if items.len() < *min_items {
                        errors.push(FieldError::min_items(path, min_items_message.clone()));
                    }
                    for (index, element) in items.iter().enumerate() {
                        item.check(Some(element), &join(path, &index.to_string()), errors);
                    }
                }
                Some(_) => errors.push(FieldError::invalid_type(path, "a list")),
            },

            Validator::Object(schema) => match value {
                Some(Value::Object(map)) => schema.check_map(map, path, errors),
                _ => errors.push(FieldError::invalid_type(path, "an object")),
            },
        }
    }
}

fn check_string(
    rules: &StringRules,
    value: Option<&Value>,
    path: &str,
    errors: &mut Vec<FieldError>,
) {
    let s = match value {
        None => {
            errors.push(FieldError::required(path, rules.required_message.clone()));
            return;
        }
        Some(Value::String(s)) => s,
        Some(_) => {
            errors.push(FieldError::invalid_type(path, "text"));
            return;
        }
    };

    if s.is_empty() {
        errors.push(FieldError::required(path, rules.required_message.clone()));
        return;
    }

    let length = s.chars().count();
    if let Some(min) = rules.min_length {
        if length < min {
            errors.push(FieldError::min_length(path, min));
        }
    }
    if let Some(max) = rules.max_length {
        if length > max {
            errors.push(FieldError::max_length(path, max));
        }
    }
    if rules.email && !is_email(s) {
        errors.push(FieldError::email(path));
    }
    if let Some(pattern) = &rules.pattern {
        if !pattern.is_match(s) {
            errors.push(FieldError::pattern(path));
        }
    }
}

fn check_number(
    rules: &NumberRules,
    value: Option<&Value>,
    path: &str,
    errors: &mut Vec<FieldError>,
) {
    let n = match value {
        None => {
            errors.push(FieldError::required(path, rules.required_message.clone()));
            return;
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            errors.push(FieldError::required(path, rules.required_message.clone()));
            return;
        }
        Some(v) => match coerce_number(v) {
            Some(n) => n,
            None => {
                errors.push(FieldError::invalid_number(path));
                return;
            }
        },
    };

    if let Some(min) = rules.min {
        if n < min {
            errors.push(FieldError::min_value(path, min));
        }
    }
    if let Some(max) = rules.max {
        if n > max {
            errors.push(FieldError::max_value(path, max));
        }
    }
}

/// Coerce a JSON number or numeric string.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Email shape check, the same rule as zod's `.email()`.
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

/// A non-fatal problem found while compiling a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaWarning {
    /// Dotted path of the field.
    pub field: String,
    pub message: String,
}

/// The compiled validation schema of a form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationSchema {
    pub root: ObjectSchema,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SchemaWarning>,
}

impl ValidationSchema {
    /// Validate a submitted form value.
    pub fn validate(&self, value: &Value) -> ValidationResult {
        let mut errors = Vec::new();
        match value {
            Value::Object(map) => self.root.check_map(map, "", &mut errors),
            _ => errors.push(FieldError::invalid_type("", "an object")),
        }
        ValidationResult::from_errors(errors)
    }

    /// Look up the validator of a top-level field.
    pub fn field(&self, name: &str) -> Option<&Validator> {
        self.root.field(name)
    }

    /// Whether compilation produced warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
