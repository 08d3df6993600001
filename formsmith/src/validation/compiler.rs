//! Compiles a field descriptor tree into a [`ValidationSchema`].

use tracing::{debug, instrument, trace, warn};

use super::messages;
use super::validator::{
    FieldRule, NumberRules, ObjectSchema, Pattern, SchemaWarning, StringRules, ValidationSchema,
    Validator,
};
use crate::error::CompileError;
use crate::model::{BaseRule, FieldDescriptor, FieldKind, FormDescriptor};

/// Turns form descriptors into validation schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaCompiler;

impl SchemaCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compile the schema of a whole form.
    #[instrument(skip(self, form), fields(title = %form.title))]
    pub fn compile(&self, form: &FormDescriptor) -> Result<ValidationSchema, CompileError> {
        let mut warnings = Vec::new();
        let root = self.compile_fields(&form.fields, "", &mut warnings)?;
        debug!(
            fields = root.fields.len(),
            warnings = warnings.len(),
            "compiled validation schema"
        );
        Ok(ValidationSchema { root, warnings })
    }

    fn compile_fields(
        &self,
        fields: &[FieldDescriptor],
        parent: &str,
        warnings: &mut Vec<SchemaWarning>,
    ) -> Result<ObjectSchema, CompileError> {
        let fields = fields
            .iter()
            .map(|field| {
                let path = if parent.is_empty() {
                    field.name.clone()
                } else {
                    format!("{}.{}", parent, field.name)
                };
                let validator = self.compile_field(field, &path, warnings)?;
                Ok(FieldRule {
                    name: field.name.clone(),
                    validator,
                })
            })
            .collect::<Result<Vec<_>, CompileError>>()?;
        Ok(ObjectSchema { fields })
    }

    /// Compile one field, including its required/optional wrapper.
    pub fn compile_field(
        &self,
        field: &FieldDescriptor,
        path: &str,
        warnings: &mut Vec<SchemaWarning>,
    ) -> Result<Validator, CompileError> {
        let kind = field.field_kind().ok_or_else(|| CompileError::UnknownKind {
            field: path.to_string(),
            kind: field.kind.to_string(),
        })?;
        let profile = kind.profile();
        let constraints = field.constraints();

        if !profile.admits_length
            && (constraints.min_length.is_some()
                || constraints.max_length.is_some()
                || constraints.pattern.is_some())
        {
            trace!(field = %path, kind = %kind, "ignoring length/pattern constraints");
        }
        if !profile.admits_range && (constraints.min.is_some() || constraints.max.is_some()) {
            trace!(field = %path, kind = %kind, "ignoring min/max constraints");
        }

        let required_message = messages::required(&field.label);

        let validator = match profile.base {
            BaseRule::String => {
                let pattern = match constraints.pattern_source() {
                    Some(source) => Some(Pattern::new(source).map_err(|err| {
                        CompileError::InvalidPattern {
                            field: path.to_string(),
                            pattern: source.to_string(),
                            reason: err.to_string(),
                        }
                    })?),
                    None => None,
                };
                let (min_length, max_length) = constraints.length_bounds();
                Validator::String(StringRules {
                    required_message,
                    min_length,
                    max_length,
                    email: kind == FieldKind::Email,
                    pattern,
                })
            }
            BaseRule::Number => Validator::Number(NumberRules {
                required_message,
                min: constraints.min,
                max: constraints.max,
            }),
            BaseRule::Boolean => Validator::Boolean {
                must_be_checked: field
                    .required
                    .then(|| messages::must_be_checked(&field.label)),
            },
            BaseRule::OneOf => {
                if field.options.is_empty() {
                    warn!(field = %path, kind = %kind, "no options: every value will be rejected");
                    warnings.push(SchemaWarning {
                        field: path.to_string(),
                        message: format!(
                            "{} field has no options and rejects every value",
                            kind
                        ),
                    });
                }
                Validator::OneOf {
                    label: field.label.clone(),
                    options: field.options.clone(),
                }
            }
            BaseRule::List => {
                let item = if field.children.is_empty() {
                    primitive_item(field.item_kind())
                } else {
                    Validator::Object(self.compile_fields(&field.children, path, warnings)?)
                };
                Validator::Array {
                    item: Box::new(item),
                    min_items: usize::from(field.required),
                    min_items_message: messages::min_items(&field.label),
                }
            }
        };

        if field.required {
            Ok(validator)
        } else {
            Ok(Validator::Optional {
                inner: Box::new(validator),
                accepts_empty_string: matches!(profile.base, BaseRule::String | BaseRule::Number),
            })
        }
    }
}

/// Validator for one item of a primitive array.
fn primitive_item(kind: FieldKind) -> Validator {
    match kind.profile().base {
        BaseRule::Number => Validator::Number(NumberRules {
            required_message: messages::ITEM_REQUIRED.to_string(),
            min: None,
            max: None,
        }),
        BaseRule::Boolean => Validator::Boolean {
            must_be_checked: None,
        },
        _ => {
            let mut rules = StringRules::new(messages::ITEM_REQUIRED);
            rules.email = kind == FieldKind::Email;
            Validator::String(rules)
        }
    }
}
