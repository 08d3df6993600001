//! Artifact emitter trait definition.
//!
//! Each emitter renders a [`FormDescriptor`] into one textual artifact. The
//! trait gives the compiler a uniform way to run all of them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::FormDescriptor;
use crate::naming::Identifiers;

/// Trait for artifact emitters.
///
/// Emission never fails on a well-formed descriptor. Fields of an
/// unrecognized kind render as an explanatory comment instead.
pub trait ArtifactEmitter: Send + Sync {
    /// Short lowercase identifier (e.g. "schema").
    fn id(&self) -> &'static str;

    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// File extension of the artifact.
    fn file_extension(&self) -> &'static str;

    /// The artifact kind this emitter produces.
    fn kind(&self) -> ArtifactKind;

    /// File name of the artifact for a form.
    fn file_name(&self, ids: &Identifiers) -> String;

    /// Render the artifact.
    fn emit(
        &self,
        form: &FormDescriptor,
        ids: &Identifiers,
        config: &EmitterConfig,
    ) -> GeneratedArtifact;
}

/// Emitter configuration options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Indentation style
    #[serde(default)]
    pub indent: IndentStyle,

    /// Line ending style
    #[serde(default)]
    pub line_ending: LineEnding,
}

impl EmitterConfig {
    /// Create a new emitter config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation style.
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    /// Set the line ending style.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    /// Two spaces
    #[default]
    Spaces2,

    /// Four spaces
    Spaces4,

    /// Tabs
    Tabs,
}

impl IndentStyle {
    /// Get the indentation string.
    pub fn as_str(&self) -> &str {
        match self {
            IndentStyle::Spaces2 => "  ",
            IndentStyle::Spaces4 => "    ",
            IndentStyle::Tabs => "\t",
        }
    }

    /// Create an indentation string for the given depth.
    pub fn indent(&self, depth: usize) -> String {
        self.as_str().repeat(depth)
    }
}

/// Line ending style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Unix-style line endings (LF)
    #[default]
    Lf,

    /// Windows-style line endings (CRLF)
    CrLf,
}

impl LineEnding {
    /// Get the line ending string.
    pub fn as_str(&self) -> &str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// The three artifacts generated for every form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// The React form component.
    Component,
    /// The zod schema source.
    Schema,
    /// The TypeScript type declarations.
    Types,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Component,
        ArtifactKind::Schema,
        ArtifactKind::Types,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Component => "component",
            ArtifactKind::Schema => "schema",
            ArtifactKind::Types => "types",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,

    /// Derived file name, e.g. `UserRegistrationForm.tsx`.
    pub file_name: String,

    /// The generated source text.
    pub content: String,
}

impl GeneratedArtifact {
    pub fn new(kind: ArtifactKind, file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind,
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Number of lines in the artifact.
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_style() {
        assert_eq!(IndentStyle::Spaces2.indent(2), "    ");
        assert_eq!(IndentStyle::Spaces4.indent(1), "    ");
        assert_eq!(IndentStyle::Tabs.indent(3), "\t\t\t");
        assert_eq!(IndentStyle::default(), IndentStyle::Spaces2);
    }

    #[test]
    fn test_config_builder() {
        let config = EmitterConfig::new()
            .with_indent(IndentStyle::Spaces4)
            .with_line_ending(LineEnding::CrLf);
        assert_eq!(config.indent, IndentStyle::Spaces4);
        assert_eq!(config.line_ending.as_str(), "\r\n");
    }

    #[test]
    fn test_config_deserializes_lowercase() {
        let config: EmitterConfig =
            serde_json::from_str(r#"{ "indent": "tabs", "line_ending": "crlf" }"#).unwrap();
        assert_eq!(config.indent, IndentStyle::Tabs);
        assert_eq!(config.line_ending, LineEnding::CrLf);
    }

    #[test]
    fn test_artifact_line_count() {
        let artifact = GeneratedArtifact::new(ArtifactKind::Types, "types.ts", "a\nb\n");
        assert_eq!(artifact.line_count(), 2);
        assert_eq!(artifact.kind.to_string(), "types");
    }
}
