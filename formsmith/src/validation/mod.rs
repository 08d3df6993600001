//! Validation compiler and runtime schema.
//!
//! [`SchemaCompiler`] turns the descriptor tree into a [`ValidationSchema`],
//! which checks submitted JSON values and reports [`FieldError`]s.
//!
//! ```rust
//! use formsmith::model::{FieldDescriptor, FieldKind, FormDescriptor};
//! use formsmith::validation::SchemaCompiler;
//! use serde_json::json;
//!
//! let form = FormDescriptor::new(
//!     "Newsletter",
//!     vec![FieldDescriptor::new("agree", FieldKind::Boolean, "Agree").required()],
//! );
//! let schema = SchemaCompiler::new().compile(&form).unwrap();
//!
//! assert!(schema.validate(&json!({ "agree": true })).is_valid());
//! assert!(!schema.validate(&json!({ "agree": false })).is_valid());
//! ```

pub mod compiler;
pub mod messages;
pub mod result;
pub mod validator;

pub use compiler::SchemaCompiler;
pub use result::{FieldError, ValidationResult};
pub use validator::{
    FieldRule, NumberRules, ObjectSchema, Pattern, SchemaWarning, StringRules, ValidationSchema,
    Validator,
};
