//! Settings management for the CLI.
//!
//! Settings come from a `formsmith.toml` file and are overridden by
//! command-line arguments.

use crate::error::{CliResult, ConfigError};
use formsmith::{EmitterConfig, LoadOptions, Strictness};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default settings filename.
pub const CONFIG_FILENAME: &str = "formsmith.toml";

/// Default form configuration filename written by `init`.
pub const SAMPLE_FORM_FILENAME: &str = "form.json";

/// Main settings structure.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings.
    pub output: OutputConfig,

    /// Formatting of generated code.
    pub emit: EmitterConfig,

    /// How form configurations are checked when loaded.
    pub load: LoadConfig,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for generated files.
    pub dir: PathBuf,

    /// Also write `FieldWrapper.tsx` and `SelectFieldWrapper.tsx`.
    pub support: bool,
}

/// Loading settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub strictness: Strictness,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            support: false,
        }
    }
}

impl Config {
    /// Load options for form configurations.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strictness: self.load.strictness,
        }
    }
}

/// Settings manager for loading and merging settings.
pub struct ConfigManager;

impl ConfigManager {
    /// Load settings from a file path.
    ///
    /// Without a path the default location is tried. A missing file yields
    /// the default settings.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no settings file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path, e.to_string()))?;

        Ok(config)
    }

    /// Merge CLI arguments into settings.
    ///
    /// CLI arguments take precedence over file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(support) = args.support {
            config.output.support = support;
        }

        if let Some(permissive) = args.permissive {
            config.load.strictness = if permissive {
                Strictness::Permissive
            } else {
                Strictness::Strict
            };
        }

        config
    }

    /// Settings file content written by `init`.
    pub fn default_config_content() -> &'static str {
        r#"# formsmith settings

[output]
# Directory receiving the generated component, schema and types
dir = "./generated"

# Also write FieldWrapper.tsx and SelectFieldWrapper.tsx
support = false

[emit]
# Indentation: "spaces2", "spaces4" or "tabs"
indent = "spaces2"

# Line endings: "lf" or "crlf"
line_ending = "lf"

[load]
# "strict" rejects unknown field types and missing options;
# "permissive" keeps them and degrades per field
strictness = "strict"
"#
    }

    /// Sample form configuration written by `init`.
    pub fn sample_form_content() -> &'static str {
        r#"{
  "title": "User Registration Form",
  "fields": [
    {
      "name": "firstName",
      "type": "text",
      "label": "First Name",
      "required": true,
      "validation": { "minLength": 2, "maxLength": 50 }
    },
    {
      "name": "email",
      "type": "email",
      "label": "Email Address",
      "required": true
    },
    {
      "name": "age",
      "type": "number",
      "label": "Age",
      "validation": { "min": 18, "max": 120 }
    },
    {
      "name": "role",
      "type": "select",
      "label": "Role",
      "required": true,
      "options": ["Developer", "Designer", "Manager"]
    },
    {
      "name": "newsletter",
      "type": "boolean",
      "label": "Subscribe to newsletter"
    },
    {
      "name": "hobbies",
      "type": "array",
      "label": "Hobbies",
      "itemType": "text"
    }
  ]
}
"#
    }
}

/// CLI arguments that can override settings.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Support files override.
    pub support: Option<bool>,

    /// Loading mode override.
    pub permissive: Option<bool>,
}
