//! Turning a form configuration into the files written to disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::loader::load_form;
use formsmith::{CompiledForm, FormCompiler};

/// One file to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub content: String,
}

/// The compiled form and the files it produces.
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    pub compiled: CompiledForm,
    pub files: Vec<OutputFile>,
}

/// A generated file whose on-disk content differs from a fresh compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Drift {
    Missing(PathBuf),
    Changed(PathBuf),
}

impl Drift {
    pub fn path(&self) -> &Path {
        match self {
            Drift::Missing(p) | Drift::Changed(p) => p,
        }
    }
}

/// Compiles form configurations according to the CLI settings.
pub struct FormGenerator {
    config: Config,
    compiler: FormCompiler,
}

impl FormGenerator {
    pub fn new(config: Config) -> Self {
        let compiler = FormCompiler::new(config.emit);
        Self { config, compiler }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load and compile a form configuration file.
    pub fn compile_file(&self, form_path: &Path) -> CliResult<CompiledForm> {
        let form = load_form(form_path, self.config.load_options())?;
        Ok(self.compiler.compile(&form)?)
    }

    /// Compile a form configuration and lay out its output files.
    pub fn generate(&self, form_path: &Path) -> CliResult<GeneratedOutput> {
        let compiled = self.compile_file(form_path)?;
        let dir = &self.config.output.dir;

        let mut files: Vec<_> = compiled
            .artifacts
            .iter()
            .map(|artifact| OutputFile {
                path: dir.join(&artifact.file_name),
                content: artifact.content.clone(),
            })
            .collect();

        if self.config.output.support {
            files.extend(self.compiler.support_files().into_iter().map(|file| OutputFile {
                path: dir.join(&file.file_name),
                content: file.content,
            }));
        }

        for warning in &compiled.schema.warnings {
            info!(field = %warning.field, "{}", warning.message);
        }
        debug!(files = files.len(), dir = %dir.display(), "planned output");

        Ok(GeneratedOutput { compiled, files })
    }

    /// Compare the files on disk with a fresh compile.
    pub fn check(&self, form_path: &Path) -> CliResult<Vec<Drift>> {
        let output = self.generate(form_path)?;
        let mut drift = Vec::new();

        for file in &output.files {
            if !file.path.exists() {
                drift.push(Drift::Missing(file.path.clone()));
                continue;
            }
            let existing = std::fs::read_to_string(&file.path).map_err(|source| CliError::Read {
                path: file.path.clone(),
                source,
            })?;
            if existing != file.content {
                drift.push(Drift::Changed(file.path.clone()));
            }
        }

        Ok(drift)
    }
}
