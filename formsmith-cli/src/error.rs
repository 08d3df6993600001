//! Error types for the CLI.

use std::path::PathBuf;
use thiserror::Error;

use formsmith::FormError;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// The form configuration could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The form configuration is invalid.
    #[error("{0}")]
    Form(#[from] FormError),

    /// A submitted data file is not valid JSON.
    #[error("Invalid data in {path}: {message}")]
    Data { path: PathBuf, message: String },

    /// Error loading the settings file.
    #[error("Failed to load settings: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// Error during file watching.
    #[error("Watch error: {0}")]
    Watch(#[from] WatchError),

    /// Generated files differ from a fresh compile.
    #[error("Check failed: {0}")]
    Check(String),

    /// A submission failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// Failed checks and validations exit with 2, everything else with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Check(_) | CliError::Validation(_) => 2,
            _ => 1,
        }
    }
}

/// Error loading the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// A settings file already exists where `init` would write one.
    #[error("File already exists: {path} (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error during file watching.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Failed to initialize watcher.
    #[error("Failed to initialize file watcher: {0}")]
    Init(String),

    /// Error from notify crate.
    #[error("Watch notification error: {0}")]
    Notify(String),
}

impl ConfigError {
    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith::{FormCompiler, LoadOptions};

    #[test]
    fn test_form_error_message_is_readable() {
        let err: CliError = FormCompiler::default()
            .compile_str(r#"{"title": "", "fields": []}"#, LoadOptions::default())
            .unwrap_err()
            .into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: form title must not be empty"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Check("stale".into()).exit_code(), 2);
        assert_eq!(CliError::Validation("bad".into()).exit_code(), 2);
        assert_eq!(
            CliError::Watch(WatchError::Init("x".into())).exit_code(),
            1
        );
    }
}
