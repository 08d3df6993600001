//! # formsmith-cli
//!
//! Library behind the `formsmith` command: loads form configurations from
//! disk, writes the compiled artifacts, and watches for changes.
//!
//! - [`config`] - `formsmith.toml` settings and CLI overrides
//! - [`loader`] - reading form configurations and submissions
//! - [`generator`] - compiling a form into output files, and checking them
//! - [`writer`] - file output and dry-run support
//! - [`watcher`] - regenerating on change
//! - [`error`] - error types

pub mod config;
pub mod error;
pub mod generator;
pub mod loader;
pub mod watcher;
pub mod writer;

pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use generator::{Drift, FormGenerator, GeneratedOutput, OutputFile};
pub use watcher::FileWatcher;
pub use writer::{FileWriter, WriteResult};
