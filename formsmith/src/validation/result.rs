//! Field-level validation errors and results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

use super::messages;

/// Validation error for a single field.
///
/// `field` is a dotted path in react-hook-form notation, e.g.
/// `addresses.0.street`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path of the field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Error code identifying the type of validation failure
    pub code: String,
}

impl FieldError {
    /// Create a new field error
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }

    /// A missing or empty required value
    pub fn required(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, "required")
    }

    pub fn min_length(field: impl Into<String>, min: usize) -> Self {
        Self::new(field, messages::min_length(min), "min_length")
    }

    pub fn max_length(field: impl Into<String>, max: usize) -> Self {
        Self::new(field, messages::max_length(max), "max_length")
    }

    pub fn email(field: impl Into<String>) -> Self {
        Self::new(field, messages::EMAIL, "email")
    }

    pub fn pattern(field: impl Into<String>) -> Self {
        Self::new(field, messages::PATTERN, "pattern")
    }

    pub fn invalid_number(field: impl Into<String>) -> Self {
        Self::new(field, messages::INVALID_NUMBER, "invalid_number")
    }

    pub fn min_value(field: impl Into<String>, min: f64) -> Self {
        Self::new(field, messages::min_value(min), "min_value")
    }

    pub fn max_value(field: impl Into<String>, max: f64) -> Self {
        Self::new(field, messages::max_value(max), "max_value")
    }

    /// A required checkbox left unchecked
    pub fn must_be_checked(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, "must_be_checked")
    }

    /// A value outside the field's option list
    pub fn invalid_option(field: impl Into<String>, label: &str) -> Self {
        Self::new(field, messages::invalid_option(label), "invalid_option")
    }

    /// Too few items in a list
    pub fn min_items(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, "min_items")
    }

    /// A value of the wrong JSON type
    pub fn invalid_type(field: impl Into<String>, expected: &str) -> Self {
        Self::new(field, format!("Expected {}", expected), "invalid_type")
    }

    /// Create a custom field error
    pub fn custom(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, "custom")
    }
}

/// Result of validating a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the submission is valid
    pub valid: bool,
    /// Field-level errors (empty if valid)
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        trace!("Validation passed");
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Create a validation result from a list of errors.
    /// If the list is empty, the result is valid.
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            trace!("Validation passed (no errors)");
        } else {
            let field_names: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
            debug!(
                error_count = errors.len(),
                fields = ?field_names,
                "Validation failed"
            );
        }
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Get the errors
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Errors reported for one field path
    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// Convert to a map of field -> errors for easier lookup
    pub fn errors_by_field(&self) -> HashMap<String, Vec<&FieldError>> {
        let mut map: HashMap<String, Vec<&FieldError>> = HashMap::new();
        for error in &self.errors {
            map.entry(error.field.clone()).or_default().push(error);
        }
        map
    }

    /// Merge another validation result into this one
    pub fn merge(mut self, other: ValidationResult) -> Self {
        trace!(
            current_errors = self.errors.len(),
            other_errors = other.errors.len(),
            "Merging validation results"
        );
        self.errors.extend(other.errors);
        self.valid = self.errors.is_empty();
        self
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}
