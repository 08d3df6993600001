//! Form descriptor and structural validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use super::field::FieldDescriptor;
use super::kind::{FieldKind, FieldType};
use crate::error::{LoadError, StructuralError};

/// How strictly a parsed document is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Reject every invariant violation.
    #[default]
    Strict,

    /// Keep unknown kinds, treat missing options as empty, ignore stray
    /// `fields`/`itemType`. Empty titles, empty names and duplicate names
    /// are still rejected.
    Permissive,
}

/// Options for loading a form configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub strictness: Strictness,
}

impl LoadOptions {
    /// Strict loading.
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
        }
    }

    /// Permissive loading.
    pub fn permissive() -> Self {
        Self {
            strictness: Strictness::Permissive,
        }
    }
}

/// A complete form: a title plus its top-level fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDescriptor {
    pub title: String,

    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    /// Create a form from a title and fields, without checking it.
    pub fn new(title: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            title: title.into(),
            fields,
        }
    }

    /// Parse and check a JSON document.
    pub fn from_json_str(json: &str, options: LoadOptions) -> Result<Self, LoadError> {
        let form: FormDescriptor = serde_json::from_str(json)?;
        form.finish(options)
    }

    /// Check an already parsed JSON value.
    pub fn from_value(value: Value, options: LoadOptions) -> Result<Self, LoadError> {
        let form: FormDescriptor = serde_json::from_value(value)?;
        form.finish(options)
    }

    #[instrument(skip(self), fields(title = %self.title, fields = self.fields.len()))]
    fn finish(mut self, options: LoadOptions) -> Result<Self, LoadError> {
        self.validate(options.strictness)?;
        if options.strictness == Strictness::Permissive {
            normalize_fields(&mut self.fields);
        }
        debug!("form configuration loaded");
        Ok(self)
    }

    /// Check the descriptor invariants.
    pub fn validate(&self, strictness: Strictness) -> Result<(), StructuralError> {
        if self.title.trim().is_empty() {
            return Err(StructuralError::EmptyTitle);
        }
        validate_fields(&self.fields, "", strictness)
    }

    /// Number of fields in the whole tree.
    pub fn field_count(&self) -> usize {
        fn count(fields: &[FieldDescriptor]) -> usize {
            fields.iter().map(|f| 1 + count(&f.children)).sum()
        }
        count(&self.fields)
    }

    /// Deepest array nesting in the tree (0 for a flat form).
    pub fn depth(&self) -> usize {
        fn depth(fields: &[FieldDescriptor]) -> usize {
            fields
                .iter()
                .filter(|f| f.is_object_array())
                .map(|f| 1 + depth(&f.children))
                .max()
                .unwrap_or(0)
        }
        depth(&self.fields)
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn validate_fields(
    fields: &[FieldDescriptor],
    parent: &str,
    strictness: Strictness,
) -> Result<(), StructuralError> {
    let strict = strictness == Strictness::Strict;
    let mut seen = HashSet::new();

    for (index, field) in fields.iter().enumerate() {
        if field.name.trim().is_empty() {
            return Err(StructuralError::EmptyName {
                parent: if parent.is_empty() {
                    "form".to_string()
                } else {
                    parent.to_string()
                },
                index,
            });
        }

        let path = join_path(parent, &field.name);

        if !seen.insert(field.name.as_str()) {
            return Err(StructuralError::DuplicateName { field: path });
        }

        if strict && field.label.trim().is_empty() {
            return Err(StructuralError::EmptyLabel { field: path });
        }

        let kind = match &field.kind {
            FieldType::Known(kind) => *kind,
            FieldType::Unrecognized(raw) => {
                if strict {
                    return Err(StructuralError::UnknownKind {
                        field: path,
                        kind: raw.clone(),
                    });
                }
                continue;
            }
        };

        if strict && kind.has_options() && field.options.is_empty() {
            return Err(StructuralError::MissingOptions {
                field: path,
                kind: kind.to_string(),
            });
        }

        if kind != FieldKind::Array {
            if strict && !field.children.is_empty() {
                return Err(StructuralError::UnexpectedChildren {
                    field: path,
                    kind: kind.to_string(),
                });
            }
            continue;
        }

        if strict {
            if !field.children.is_empty() && field.item_type.is_some() {
                return Err(StructuralError::ConflictingItems { field: path });
            }
            if let Some(item_type) = &field.item_type {
                let primitive = item_type
                    .kind()
                    .map(|k| k.profile().primitive_item)
                    .unwrap_or(false);
                if !primitive {
                    return Err(StructuralError::InvalidItemType {
                        field: path,
                        kind: item_type.to_string(),
                    });
                }
            }
        }

        validate_fields(&field.children, &path, strictness)?;
    }

    Ok(())
}

/// Repairs applied after permissive validation.
fn normalize_fields(fields: &mut [FieldDescriptor]) {
    for field in fields {
        if field.label.trim().is_empty() {
            field.label = field.name.clone();
        }

        match field.field_kind() {
            Some(FieldKind::Array) => {
                if !field.children.is_empty() {
                    field.item_type = None;
                } else if field.item_type.is_some()
                    && field.item_kind() == FieldKind::Text
                    && field.item_type != Some(FieldType::Known(FieldKind::Text))
                {
                    field.item_type = None;
                }
                normalize_fields(&mut field.children);
            }
            _ => field.children.clear(),
        }
    }
}
