//! Artifact emitters.
//!
//! Three emitters render a form into source text:
//!
//! - [`ComponentEmitter`]: the React component (`{Type}.tsx`)
//! - [`SchemaEmitter`]: the zod schema (`schema.ts`)
//! - [`TypesEmitter`]: the TypeScript data interface (`types.ts`)
//!
//! [`support`] carries the static wrapper components the component imports.

pub mod component;
pub mod schema;
pub mod source;
pub mod support;
pub mod traits;
pub mod types;

pub use component::{array_handles, ArrayHandles, ComponentEmitter};
pub use schema::SchemaEmitter;
pub use source::SourceWriter;
pub use support::{install_command, support_files, Package, SupportFile, REQUIRED_PACKAGES};
pub use traits::{
    ArtifactEmitter, ArtifactKind, EmitterConfig, GeneratedArtifact, IndentStyle, LineEnding,
};
pub use types::TypesEmitter;

/// The emitters run for every form, in artifact order.
pub fn default_emitters() -> Vec<Box<dyn ArtifactEmitter>> {
    vec![
        Box::new(ComponentEmitter::new()),
        Box::new(SchemaEmitter::new()),
        Box::new(TypesEmitter::new()),
    ]
}
