//! Default value synthesis.
//!
//! Produces the initial values of a form. Never fails: fields of an
//! unrecognized kind start out as the empty string.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;

use crate::model::{DefaultRule, FieldDescriptor, FormDescriptor};

/// Initial values keyed by field name, mirroring the form's shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DefaultValueTree(Map<String, Value>);

impl DefaultValueTree {
    /// Synthesize defaults for a sequence of fields.
    pub fn synthesize(fields: &[FieldDescriptor]) -> Self {
        let map = fields
            .iter()
            .map(|field| (field.name.clone(), field_default(field)))
            .collect();
        Self(map)
    }

    /// Synthesize defaults for a whole form.
    pub fn for_form(form: &FormDescriptor) -> Self {
        Self::synthesize(&form.fields)
    }

    /// The value appended by an array field's "add item" action.
    ///
    /// An object of the children's defaults for composite arrays, the item
    /// kind's default for primitive arrays.
    pub fn item_template(field: &FieldDescriptor) -> Value {
        if field.children.is_empty() {
            field.item_kind().profile().default.value()
        } else {
            Value::Object(Self::synthesize(&field.children).0)
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Field names, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// The default rule of a field, the empty string for unknown kinds.
pub fn default_rule(field: &FieldDescriptor) -> DefaultRule {
    match field.field_kind() {
        Some(kind) => kind.profile().default,
        None => {
            trace!(field = %field.name, kind = %field.kind, "unknown kind defaults to empty string");
            DefaultRule::EmptyString
        }
    }
}

fn field_default(field: &FieldDescriptor) -> Value {
    default_rule(field).value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldKind, FieldType};
    use serde_json::json;

    #[test]
    fn test_per_kind_defaults() {
        let tree = DefaultValueTree::synthesize(&[
            FieldDescriptor::new("name", FieldKind::Text, "Name"),
            FieldDescriptor::new("age", FieldKind::Number, "Age"),
            FieldDescriptor::new("bio", FieldKind::TextArea, "Bio"),
            FieldDescriptor::new("news", FieldKind::Boolean, "News"),
            FieldDescriptor::new("role", FieldKind::Radio, "Role").with_options(["A"]),
            FieldDescriptor::new("tags", FieldKind::Array, "Tags"),
            FieldDescriptor::new("when", FieldType::from("date"), "When"),
        ]);
        assert_eq!(
            tree.into_value(),
            json!({
                "name": "",
                "age": "",
                "bio": "",
                "news": false,
                "role": "",
                "tags": [],
                "when": ""
            })
        );
    }

    #[test]
    fn test_keys_keep_declaration_order() {
        let tree = DefaultValueTree::synthesize(&[
            FieldDescriptor::new("zeta", FieldKind::Text, "Z"),
            FieldDescriptor::new("alpha", FieldKind::Text, "A"),
        ]);
        let keys: Vec<_> = tree.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_item_template() {
        let addresses = FieldDescriptor::new("addresses", FieldKind::Array, "Addresses")
            .with_children(vec![
                FieldDescriptor::new("street", FieldKind::Text, "Street"),
                FieldDescriptor::new("primary", FieldKind::Boolean, "Primary"),
                FieldDescriptor::new("floor", FieldKind::Number, "Floor"),
            ]);
        assert_eq!(
            DefaultValueTree::item_template(&addresses),
            json!({ "street": "", "primary": false, "floor": "" })
        );

        let flags = FieldDescriptor::new("flags", FieldKind::Array, "Flags")
            .with_item_type(FieldKind::Boolean);
        assert_eq!(DefaultValueTree::item_template(&flags), json!(false));

        let tags = FieldDescriptor::new("tags", FieldKind::Array, "Tags");
        assert_eq!(DefaultValueTree::item_template(&tags), json!(""));
    }
}
