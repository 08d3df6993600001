//! Field descriptor definitions.
//!
//! A [`FieldDescriptor`] is one node of the form tree. Only array fields
//! carry children; all other kinds are leaves.

use serde::{Deserialize, Serialize};

use super::kind::{FieldKind, FieldType};

/// Optional bounds attached to a field.
///
/// Length bounds and `pattern` only apply to text-like kinds, `min`/`max`
/// only to numbers. Bounds that do not apply to a field's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Regular expression source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ValidationConstraints {
    /// Create empty constraints.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    pub fn with_max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn with_min(mut self, n: f64) -> Self {
        self.min = Some(n);
        self
    }

    pub fn with_max(mut self, n: f64) -> Self {
        self.max = Some(n);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Length bounds in effect. A bound of zero imposes nothing.
    pub fn length_bounds(&self) -> (Option<usize>, Option<usize>) {
        (
            self.min_length.filter(|n| *n > 0),
            self.max_length.filter(|n| *n > 0),
        )
    }

    /// Pattern in effect, ignoring an empty source.
    pub fn pattern_source(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }
}

/// One field of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Identifier, unique among siblings.
    pub name: String,

    #[serde(rename = "type")]
    pub kind: FieldType,

    /// Display label.
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, rename = "validation", skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ValidationConstraints>,

    /// Accepted values of a select or radio field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Item kind of a primitive array. Text when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<FieldType>,

    /// Object item fields of a composite array.
    #[serde(default, rename = "fields", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FieldDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
}

impl FieldDescriptor {
    /// Create an optional field with no constraints.
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<FieldType>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            label: label.into(),
            required: false,
            constraints: None,
            options: Vec::new(),
            item_type: None,
            children: Vec::new(),
            placeholder: None,
            helper_text: None,
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the required flag.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_constraints(mut self, constraints: ValidationConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_item_type(mut self, item_type: impl Into<FieldType>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    pub fn with_children(mut self, children: Vec<FieldDescriptor>) -> Self {
        self.children = children;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_helper_text(mut self, helper_text: impl Into<String>) -> Self {
        self.helper_text = Some(helper_text.into());
        self
    }

    /// The known kind, or `None` for an unrecognized `type`.
    pub fn field_kind(&self) -> Option<FieldKind> {
        self.kind.kind()
    }

    /// Whether this is an array whose items are objects.
    pub fn is_object_array(&self) -> bool {
        self.field_kind() == Some(FieldKind::Array) && !self.children.is_empty()
    }

    /// Item kind of a primitive array.
    pub fn item_kind(&self) -> FieldKind {
        self.item_type
            .as_ref()
            .and_then(FieldType::kind)
            .filter(|kind| kind.profile().primitive_item)
            .unwrap_or(FieldKind::Text)
    }

    /// Placeholder text, falling back to `Enter {label}` in lower case.
    pub fn placeholder_text(&self) -> String {
        match &self.placeholder {
            Some(placeholder) => placeholder.clone(),
            None => format!("Enter {}", self.label.to_lowercase()),
        }
    }

    /// Constraints, or the empty set.
    pub fn constraints(&self) -> ValidationConstraints {
        self.constraints.clone().unwrap_or_default()
    }
}

/// Render a bound the way JavaScript prints numbers (`18`, not `18.0`).
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
