//! Compiler facade running every stage over one form.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::defaults::DefaultValueTree;
use crate::emit::{
    default_emitters, support_files, ArtifactEmitter, ArtifactKind, EmitterConfig,
    GeneratedArtifact, SupportFile,
};
use crate::error::FormResult;
use crate::model::{FormDescriptor, LoadOptions};
use crate::naming::Identifiers;
use crate::validation::{SchemaCompiler, ValidationSchema};

/// Everything produced from one form descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledForm {
    /// Identifiers derived from the title.
    pub identifiers: Identifiers,

    /// The runtime validation schema.
    pub schema: ValidationSchema,

    /// Initial form values.
    pub defaults: DefaultValueTree,

    /// Emitted source artifacts, in [`ArtifactKind::ALL`] order.
    pub artifacts: Vec<GeneratedArtifact>,
}

impl CompiledForm {
    /// Look up an artifact by kind.
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&GeneratedArtifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }
}

/// Runs identifier derivation, schema compilation, default synthesis and
/// every emitter.
pub struct FormCompiler {
    config: EmitterConfig,
    emitters: Vec<Box<dyn ArtifactEmitter>>,
}

impl FormCompiler {
    pub fn new(config: EmitterConfig) -> Self {
        Self {
            config,
            emitters: default_emitters(),
        }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Compile a form.
    ///
    /// Identifier and schema errors abort before any artifact is emitted.
    #[instrument(skip(self, form), fields(title = %form.title))]
    pub fn compile(&self, form: &FormDescriptor) -> FormResult<CompiledForm> {
        let identifiers = Identifiers::from_title(&form.title)?;
        let schema = SchemaCompiler::new().compile(form)?;
        let defaults = DefaultValueTree::for_form(form);

        let artifacts: Vec<_> = self
            .emitters
            .iter()
            .map(|emitter| emitter.emit(form, &identifiers, &self.config))
            .collect();

        debug!(
            component = identifiers.component_name(),
            artifacts = artifacts.len(),
            warnings = schema.warnings.len(),
            "compiled form"
        );

        Ok(CompiledForm {
            identifiers,
            schema,
            defaults,
            artifacts,
        })
    }

    /// Load and compile a JSON form configuration.
    pub fn compile_str(&self, json: &str, options: LoadOptions) -> FormResult<CompiledForm> {
        let form = FormDescriptor::from_json_str(json, options)?;
        self.compile(&form)
    }

    /// The static support components, formatted like the artifacts.
    pub fn support_files(&self) -> Vec<SupportFile> {
        support_files(&self.config)
    }
}

impl Default for FormCompiler {
    fn default() -> Self {
        Self::new(EmitterConfig::default())
    }
}
