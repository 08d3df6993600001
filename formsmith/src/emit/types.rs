//! TypeScript type declaration emitter.

use tracing::debug;

use super::schema::unsupported_comment;
use super::source::{property_key, quote, SourceWriter};
use super::traits::{ArtifactEmitter, ArtifactKind, EmitterConfig, GeneratedArtifact};
use crate::model::{BaseRule, FieldDescriptor, FieldKind, FormDescriptor};
use crate::naming::Identifiers;

/// Emits `types.ts`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypesEmitter;

impl TypesEmitter {
    pub fn new() -> Self {
        Self
    }

    fn emit_members(
        &self,
        w: &mut SourceWriter<'_>,
        fields: &[FieldDescriptor],
        depth: usize,
        parent: &str,
    ) {
        for field in fields {
            let path = if parent.is_empty() {
                field.name.clone()
            } else {
                format!("{}.{}", parent, field.name)
            };
            let member = format!(
                "{}{}",
                property_key(&field.name),
                if field.required { "" } else { "?" }
            );

            match field.field_kind() {
                None => w.line(depth, unsupported_comment(field, &path)),
                Some(_) if field.is_object_array() => {
                    w.line(depth, format!("{}: Array<{{", member));
                    self.emit_members(w, &field.children, depth + 1, &path);
                    w.line(depth, "}>;");
                }
                Some(kind) => w.line(depth, format!("{}: {};", member, type_expr(field, kind))),
            }
        }
    }
}

/// The declared type of a leaf or primitive array field.
fn type_expr(field: &FieldDescriptor, kind: FieldKind) -> String {
    match kind.profile().base {
        BaseRule::String => "string".to_string(),
        BaseRule::Number => "number".to_string(),
        BaseRule::Boolean => "boolean".to_string(),
        BaseRule::OneOf if field.options.is_empty() => "string".to_string(),
        BaseRule::OneOf => {
            let options: Vec<_> = field.options.iter().map(|o| quote(o)).collect();
            options.join(" | ")
        }
        BaseRule::List => {
            let item = field.item_kind();
            format!("{}[]", type_expr(field, item))
        }
    }
}

impl ArtifactEmitter for TypesEmitter {
    fn id(&self) -> &'static str {
        "types"
    }

    fn name(&self) -> &'static str {
        "TypeScript Types Emitter"
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Types
    }

    fn file_name(&self, _ids: &Identifiers) -> String {
        format!("types.{}", self.file_extension())
    }

    fn emit(
        &self,
        form: &FormDescriptor,
        ids: &Identifiers,
        config: &EmitterConfig,
    ) -> GeneratedArtifact {
        let mut w = SourceWriter::new(config);
        w.line(0, format!("export interface {} {{", ids.form_data_type()));
        self.emit_members(&mut w, &form.fields, 1, "");
        w.line(0, "}");

        let artifact = GeneratedArtifact::new(self.kind(), self.file_name(ids), w.finish());
        debug!(file = %artifact.file_name, lines = artifact.line_count(), "emitted types");
        artifact
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldType;

    fn emit(fields: Vec<FieldDescriptor>) -> String {
        let form = FormDescriptor::new("Contact", fields);
        let ids = Identifiers::from_title(&form.title).unwrap();
        TypesEmitter::new()
            .emit(&form, &ids, &EmitterConfig::default())
            .content
    }

    #[test]
    fn test_primitive_members() {
        let out = emit(vec![
            FieldDescriptor::new("name", FieldKind::Text, "Name").required(),
            FieldDescriptor::new("age", FieldKind::Number, "Age"),
            FieldDescriptor::new("news", FieldKind::Boolean, "News"),
        ]);
        assert_eq!(
            out,
            "export interface ContactFormData {\n  name: string;\n  age?: number;\n  news?: boolean;\n}\n"
        );
    }

    #[test]
    fn test_option_unions() {
        let out = emit(vec![
            FieldDescriptor::new("role", FieldKind::Radio, "Role")
                .required()
                .with_options(["Dev", "Ops"]),
            FieldDescriptor::new("color", FieldKind::Select, "Color"),
        ]);
        assert!(out.contains("  role: 'Dev' | 'Ops';\n"));
        assert!(out.contains("  color?: string;\n"));
    }

    #[test]
    fn test_arrays() {
        let out = emit(vec![
            FieldDescriptor::new("tags", FieldKind::Array, "Tags"),
            FieldDescriptor::new("scores", FieldKind::Array, "Scores")
                .required()
                .with_item_type(FieldKind::Number),
            FieldDescriptor::new("people", FieldKind::Array, "People").with_children(vec![
                FieldDescriptor::new("name", FieldKind::Text, "Name").required(),
                FieldDescriptor::new("pets", FieldKind::Array, "Pets").with_children(vec![
                    FieldDescriptor::new("kind", FieldKind::Text, "Kind"),
                ]),
            ]),
        ]);
        assert!(out.contains("  tags?: string[];\n"));
        assert!(out.contains("  scores: number[];\n"));
        assert!(out.contains(
            "  people?: Array<{\n    name: string;\n    pets?: Array<{\n      kind?: string;\n    }>;\n  }>;\n"
        ));
    }

    #[test]
    fn test_unknown_kind() {
        let out = emit(vec![FieldDescriptor::new("when", FieldType::from("date"), "When")]);
        assert!(out.contains("// Unsupported field type: \"date\" for field \"when\""));
    }
}
