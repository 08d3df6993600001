//! # formsmith
//!
//! Compiles a declarative form configuration into everything a form needs:
//! a runtime validation schema, initial values, and React + zod source code.
//!
//! ## Quick Start
//!
//! ```rust
//! use formsmith::{ArtifactKind, FormCompiler, LoadOptions};
//!
//! let json = r#"{
//!     "title": "Contact Us",
//!     "fields": [
//!         { "name": "email", "type": "email", "label": "Email", "required": true }
//!     ]
//! }"#;
//!
//! let compiled = FormCompiler::default()
//!     .compile_str(json, LoadOptions::default())
//!     .unwrap();
//!
//! assert_eq!(compiled.identifiers.component_name(), "ContactUs");
//! let schema = compiled.artifact(ArtifactKind::Schema).unwrap();
//! assert!(schema.content.contains("export const contactUsSchema = z.object({"));
//! ```
//!
//! ## Stages
//!
//! | Module | Stage |
//! |--------|-------|
//! | [`model`] | Field descriptor tree and structural validation |
//! | [`naming`] | Identifiers derived from the form title |
//! | [`validation`] | Schema compiler and runtime validators |
//! | [`defaults`] | Initial form values |
//! | [`emit`] | Component, schema and types source emitters |
//! | [`compiler`] | [`FormCompiler`] running every stage |
//!
//! All stages are pure functions of the descriptor; nothing here touches the
//! file system.

pub mod compiler;
pub mod defaults;
pub mod emit;
pub mod error;
pub mod model;
pub mod naming;
pub mod validation;

pub use compiler::{CompiledForm, FormCompiler};
pub use defaults::DefaultValueTree;
pub use emit::{ArtifactKind, EmitterConfig, GeneratedArtifact, IndentStyle, LineEnding};
pub use error::{
    CompileError, FormError, FormResult, IdentifierError, LoadError, StructuralError,
};
pub use model::{FieldDescriptor, FieldKind, FieldType, FormDescriptor, LoadOptions, Strictness};
pub use naming::Identifiers;
pub use validation::{FieldError, SchemaCompiler, ValidationResult, ValidationSchema};
