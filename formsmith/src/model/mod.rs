//! Field descriptor model.
//!
//! The parsed form configuration. This is the tree every compiler pass walks.

pub mod field;
pub mod form;
pub mod kind;

pub use field::{FieldDescriptor, ValidationConstraints};
pub use form::{FormDescriptor, LoadOptions, Strictness};
pub use kind::{BaseRule, Control, DefaultRule, FieldKind, FieldType, KindProfile};
