//! Error types for the form compiler.
//!
//! Structural and identifier errors block every output because the
//! descriptor tree is shared by all stages. Schema compile errors abort the
//! schema as a whole rather than degrading a single field.

use thiserror::Error;

/// Result type alias for compiler operations.
pub type FormResult<T> = Result<T, FormError>;

/// Top-level error returned by [`crate::FormCompiler`].
#[derive(Debug, Error)]
pub enum FormError {
    /// The configuration could not be loaded.
    #[error("Invalid configuration: {0}")]
    Load(#[from] LoadError),

    /// The form title cannot be turned into identifiers.
    #[error("Invalid configuration: {0}")]
    Identifier(#[from] IdentifierError),

    /// The validation schema could not be compiled.
    #[error("Invalid configuration: {0}")]
    Compile(#[from] CompileError),
}

/// Error loading a form configuration document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document is not well-formed JSON or does not have the form shape.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but violates a descriptor invariant.
    #[error(transparent)]
    Structural(#[from] StructuralError),
}

/// A form descriptor invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The form title is empty.
    #[error("form title must not be empty")]
    EmptyTitle,

    /// A field has an empty name.
    #[error("field at position {index} in '{parent}' has an empty name")]
    EmptyName { parent: String, index: usize },

    /// A field has an empty label.
    #[error("field '{field}' must have a non-empty label")]
    EmptyLabel { field: String },

    /// Two siblings share a name.
    #[error("field '{field}' is declared more than once")]
    DuplicateName { field: String },

    /// The `type` string is not a known field kind.
    #[error("field '{field}' has unknown type '{kind}'")]
    UnknownKind { field: String, kind: String },

    /// A select or radio field has no options.
    #[error("field '{field}' of type '{kind}' requires a non-empty 'options' list")]
    MissingOptions { field: String, kind: String },

    /// `fields` was given on something other than an array.
    #[error("field '{field}' of type '{kind}' cannot declare nested 'fields'")]
    UnexpectedChildren { field: String, kind: String },

    /// An array declares both object children and a primitive item type.
    #[error("array field '{field}' declares both nested 'fields' and 'itemType'")]
    ConflictingItems { field: String },

    /// The primitive item type of an array is not a primitive kind.
    #[error("array field '{field}' has item type '{kind}', which is not a primitive type")]
    InvalidItemType { field: String, kind: String },
}

impl StructuralError {
    /// The dotted path of the offending field, when the error names one.
    pub fn field(&self) -> Option<&str> {
        match self {
            StructuralError::EmptyTitle | StructuralError::EmptyName { .. } => None,
            StructuralError::EmptyLabel { field }
            | StructuralError::DuplicateName { field }
            | StructuralError::UnknownKind { field, .. }
            | StructuralError::MissingOptions { field, .. }
            | StructuralError::UnexpectedChildren { field, .. }
            | StructuralError::ConflictingItems { field }
            | StructuralError::InvalidItemType { field, .. } => Some(field),
        }
    }
}

/// Error compiling a field into a validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The field's kind is not recognized.
    #[error("field '{field}' has unrecognized type '{kind}'")]
    UnknownKind { field: String, kind: String },

    /// The `pattern` constraint is not a valid regular expression.
    #[error("field '{field}' has invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },
}

/// Error deriving identifiers from a form title.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The title is empty or whitespace.
    #[error("form title must not be empty")]
    EmptyTitle,

    /// The title contains no letters to build an identifier from.
    #[error("form title '{0}' contains no letters to derive an identifier from")]
    NoLetters(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_prefix() {
        let err = FormError::from(CompileError::UnknownKind {
            field: "x".to_string(),
            kind: "slider".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Invalid configuration: field 'x' has unrecognized type 'slider'"
        );
    }

    #[test]
    fn test_structural_error_field() {
        let err = StructuralError::DuplicateName {
            field: "addresses.city".to_string(),
        };
        assert_eq!(err.field(), Some("addresses.city"));
        assert_eq!(StructuralError::EmptyTitle.field(), None);
    }

    #[test]
    fn test_load_error_wraps_structural() {
        let err = LoadError::from(StructuralError::EmptyTitle);
        assert_eq!(err.to_string(), "form title must not be empty");
    }
}
