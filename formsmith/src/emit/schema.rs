//! Zod schema source emitter.
//!
//! The emitted schema applies the same rules as the runtime validators in
//! [`crate::validation`], with the same messages.

use tracing::debug;

use super::source::{escape_regex, property_key, quote, SourceWriter};
use super::traits::{ArtifactEmitter, ArtifactKind, EmitterConfig, GeneratedArtifact};
use crate::model::field::format_number;
use crate::model::{BaseRule, FieldDescriptor, FieldKind, FormDescriptor};
use crate::naming::Identifiers;
use crate::validation::messages;

/// Emits `schema.ts`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaEmitter;

impl SchemaEmitter {
    pub fn new() -> Self {
        Self
    }

    fn emit_fields(
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
            let key = property_key(&field.name);

            let kind = match field.field_kind() {
                Some(kind) => kind,
                None => {
                    w.line(depth, unsupported_comment(field, &path));
                    continue;
                }
            };

            if field.is_object_array() {
                w.line(depth, format!("{}: z.array(z.object({{", key));
                self.emit_fields(w, &field.children, depth + 1, &path);
                w.line(depth, format!("}})){},", array_suffix(field)));
            } else {
                w.line(depth, format!("{}: {},", key, field_expr(field, kind)));
            }
        }
    }
}

impl ArtifactEmitter for SchemaEmitter {
    fn id(&self) -> &'static str {
        "schema"
    }

    fn name(&self) -> &'static str {
        "Zod Schema Emitter"
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Schema
    }

    fn file_name(&self, _ids: &Identifiers) -> String {
        format!("schema.{}", self.file_extension())
    }

    fn emit(
        &self,
        form: &FormDescriptor,
        ids: &Identifiers,
        config: &EmitterConfig,
    ) -> GeneratedArtifact {
        let mut w = SourceWriter::new(config);
        w.line(0, "import { z } from 'zod';");
        w.blank();
        w.line(0, format!("export const {} = z.object({{", ids.schema_name()));
        self.emit_fields(&mut w, &form.fields, 1, "");
        w.line(0, "});");
        w.blank();
        w.line(
            0,
            format!(
                "export type {} = z.infer<typeof {}>;",
                ids.form_data_type(),
                ids.schema_name()
            ),
        );

        let artifact = GeneratedArtifact::new(self.kind(), self.file_name(ids), w.finish());
        debug!(file = %artifact.file_name, lines = artifact.line_count(), "emitted schema");
        artifact
    }
}

pub(crate) fn unsupported_comment(field: &FieldDescriptor, path: &str) -> String {
    format!(
        "// Unsupported field type: \"{}\" for field \"{}\"",
        field.kind, path
    )
}

fn coerced_number() -> String {
    format!(
        "z.coerce.number({{ invalid_type_error: {} }})",
        quote(messages::INVALID_NUMBER)
    )
}

/// A number given as a JSON number or a non-blank numeric string. Blank
/// strings fail with `blank_message` instead of coercing to zero.
fn guarded_number(blank_message: &str, bounds: &str) -> String {
    format!(
        "z.union([z.number(), z.string().trim().min(1, {})]).pipe({}{})",
        quote(blank_message),
        coerced_number(),
        bounds
    )
}

/// The zod expression of a leaf or primitive array field, with its
/// required/optional suffix.
fn field_expr(field: &FieldDescriptor, kind: FieldKind) -> String {
    let constraints = field.constraints();
    let profile = kind.profile();
    // whether the base carries checks an empty optional value would fail
    let mut has_checks = false;

    let mut expr = match profile.base {
        BaseRule::String => {
            let mut expr = String::from("z.string()");
            if field.required {
                expr.push_str(&format!(
                    ".min(1, {})",
                    quote(&messages::required(&field.label))
                ));
            }
            let (min_length, max_length) = constraints.length_bounds();
            if let Some(n) = min_length {
                expr.push_str(&format!(".min({}, {})", n, quote(&messages::min_length(n))));
            }
            if let Some(n) = max_length {
                expr.push_str(&format!(".max({}, {})", n, quote(&messages::max_length(n))));
            }
            if kind == FieldKind::Email {
                expr.push_str(&format!(".email({})", quote(messages::EMAIL)));
            }
            if let Some(pattern) = constraints.pattern_source() {
                expr.push_str(&format!(
                    ".regex(/{}/, {})",
                    escape_regex(pattern),
                    quote(messages::PATTERN)
                ));
            }
            has_checks = min_length.is_some()
                || kind == FieldKind::Email
                || constraints.pattern_source().is_some();
            expr
        }
        BaseRule::Number => {
            let mut bounds = String::new();
            if let Some(n) = constraints.min {
                bounds.push_str(&format!(
                    ".min({}, {})",
                    format_number(n),
                    quote(&messages::min_value(n))
                ));
            }
            if let Some(n) = constraints.max {
                bounds.push_str(&format!(
                    ".max({}, {})",
                    format_number(n),
                    quote(&messages::max_value(n))
                ));
            }
            // a blank string fails the guard, so optional numbers accept it separately
            has_checks = true;
            guarded_number(&messages::required(&field.label), &bounds)
        }
        BaseRule::Boolean => {
            let mut expr = String::from("z.boolean()");
            if field.required {
                expr.push_str(&format!(
                    ".refine((val) => val === true, {{ message: {} }})",
                    quote(&messages::must_be_checked(&field.label))
                ));
            }
            expr
        }
        BaseRule::OneOf => {
            if field.options.is_empty() {
                // nothing is accepted
                String::from("z.never()")
            } else {
                let options: Vec<_> = field.options.iter().map(|o| quote(o)).collect();
                format!("z.enum([{}])", options.join(", "))
            }
        }
        BaseRule::List => {
            return format!("z.array({}){}", item_expr(field.item_kind()), array_suffix(field));
        }
    };

    if !field.required {
        expr.push_str(".optional()");
        if has_checks {
            expr.push_str(".or(z.literal(''))");
        }
    }
    expr
}

fn item_expr(kind: FieldKind) -> String {
    match kind.profile().base {
        BaseRule::Number => guarded_number(messages::ITEM_REQUIRED, ""),
        BaseRule::Boolean => String::from("z.boolean()"),
        _ => {
            let mut expr = format!("z.string().min(1, {})", quote(messages::ITEM_REQUIRED));
            if kind == FieldKind::Email {
                expr.push_str(&format!(".email({})", quote(messages::EMAIL)));
            }
            expr
        }
    }
}

fn array_suffix(field: &FieldDescriptor) -> String {
    if field.required {
        format!(".min(1, {})", quote(&messages::min_items(&field.label)))
    } else {
        String::from(".optional()")
    }
}
