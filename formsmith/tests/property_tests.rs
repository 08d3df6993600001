//! Property-based tests for formsmith.
//!
//! Properties tested:
//! - Defaults preserve the top-level field names
//! - Required checkboxes must be checked
//! - Select/Radio accept exactly their options
//! - Primitive arrays accept zero items iff optional
//! - Identifier derivation is idempotent
//! - Sibling arrays never share component handles

use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use formsmith::emit::array_handles;
use formsmith::naming::{derive_type_identifier, derive_value_identifier};
use formsmith::{
    ArtifactKind, DefaultValueTree, FieldDescriptor, FieldKind, FormCompiler, FormDescriptor,
    SchemaCompiler, Strictness,
};

// =============================================================================
// Generators
// =============================================================================

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,10}"
}

fn arb_kind() -> impl Strategy<Value = FieldKind> {
    prop::sample::select(FieldKind::ALL.to_vec())
}

fn arb_item_kind() -> impl Strategy<Value = FieldKind> {
    prop::sample::select(vec![
        FieldKind::Text,
        FieldKind::Email,
        FieldKind::Password,
        FieldKind::TextArea,
        FieldKind::Number,
        FieldKind::Boolean,
    ])
}

/// A well-formed field of the given kind.
fn make_field(name: String, kind: FieldKind, required: bool, item: FieldKind) -> FieldDescriptor {
    let label = format!("Label {}", name);
    let mut field = FieldDescriptor::new(name, kind, label).with_required(required);
    if kind.has_options() {
        field = field.with_options(["Alpha", "Beta"]);
    }
    if kind == FieldKind::Array {
        field = field.with_item_type(item);
    }
    field
}

/// Well-formed flat fields with unique names.
fn arb_fields() -> impl Strategy<Value = Vec<FieldDescriptor>> {
    prop::collection::vec((arb_name(), arb_kind(), any::<bool>(), arb_item_kind()), 0..10).prop_map(
        |specs| {
            let mut seen = HashSet::new();
            specs
                .into_iter()
                .filter(|(name, ..)| seen.insert(name.clone()))
                .map(|(name, kind, required, item)| make_field(name, kind, required, item))
                .collect()
        },
    )
}

fn arb_form() -> impl Strategy<Value = FormDescriptor> {
    arb_fields().prop_map(|fields| FormDescriptor::new("Generated Form", fields))
}

fn single(field: FieldDescriptor) -> FormDescriptor {
    FormDescriptor::new("Single", vec![field])
}

fn submission(name: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(name.to_string(), value);
    Value::Object(map)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Generated forms satisfy the structural invariants.
    #[test]
    fn prop_generated_forms_are_well_formed(form in arb_form()) {
        prop_assert!(form.validate(Strictness::Strict).is_ok());
    }

    /// The default value tree's keys are exactly the top-level field names.
    #[test]
    fn prop_defaults_preserve_shape(form in arb_form()) {
        let defaults = DefaultValueTree::for_form(&form);
        let keys: Vec<_> = defaults.keys().map(str::to_string).collect();
        let names: Vec<_> = form.fields.iter().map(|f| f.name.clone()).collect();
        prop_assert_eq!(keys, names);
    }

    /// A required checkbox rejects false and accepts true; an optional one accepts both.
    #[test]
    fn prop_boolean_required_means_checked(name in arb_name(), required in any::<bool>()) {
        let form = single(FieldDescriptor::new(name.clone(), FieldKind::Boolean, "Agree")
            .with_required(required));
        let schema = SchemaCompiler::new().compile(&form).unwrap();

        prop_assert!(schema.validate(&submission(&name, json!(true))).is_valid());
        prop_assert_eq!(
            schema.validate(&submission(&name, json!(false))).is_valid(),
            !required
        );
    }

    /// Select and radio fields accept exactly their listed options.
    #[test]
    fn prop_options_accept_exactly_listed(
        options in prop::collection::btree_set("[A-Za-z ]{1,8}", 1..5),
        candidate in "[A-Za-z ]{0,8}",
        radio in any::<bool>(),
        required in any::<bool>(),
    ) {
        let kind = if radio { FieldKind::Radio } else { FieldKind::Select };
        let form = single(FieldDescriptor::new("choice", kind, "Choice")
            .with_required(required)
            .with_options(options.iter().cloned()));
        let schema = SchemaCompiler::new().compile(&form).unwrap();

        for option in &options {
            prop_assert!(schema.validate(&submission("choice", json!(option))).is_valid());
        }
        prop_assert_eq!(
            schema.validate(&submission("choice", json!(candidate))).is_valid(),
            options.contains(&candidate)
        );
        prop_assert!(!schema.validate(&submission("choice", json!(""))).is_valid());
    }

    /// Primitive arrays accept zero items iff optional, and any number of valid items.
    #[test]
    fn prop_array_min_items_follows_required(
        required in any::<bool>(),
        items in prop::collection::vec("[a-z]{1,6}", 1..5),
    ) {
        let form = single(FieldDescriptor::new("tags", FieldKind::Array, "Tags")
            .with_required(required));
        let schema = SchemaCompiler::new().compile(&form).unwrap();

        prop_assert_eq!(
            schema.validate(&submission("tags", json!([]))).is_valid(),
            !required
        );
        prop_assert!(schema.validate(&submission("tags", json!(items))).is_valid());
    }

    /// Deriving from a derived identifier yields it unchanged.
    #[test]
    fn prop_identifiers_idempotent(title in "[ -~]{1,40}") {
        if let Ok(ident) = derive_type_identifier(&title) {
            prop_assert_eq!(derive_type_identifier(&ident).unwrap(), ident.clone());
            prop_assert!(ident.chars().all(|c| c.is_ascii_alphanumeric()));
        }
        if let Ok(ident) = derive_value_identifier(&title) {
            prop_assert_eq!(derive_value_identifier(&ident).unwrap(), ident);
        }
    }

    /// Every well-formed form compiles, and each top-level array gets its own handles.
    #[test]
    fn prop_array_handles_unique(form in arb_form()) {
        let compiled = FormCompiler::default().compile(&form).unwrap();
        let component = &compiled.artifact(ArtifactKind::Component).unwrap().content;

        let handles = array_handles(&form.fields);
        let arrays = form
            .fields
            .iter()
            .filter(|f| f.field_kind() == Some(FieldKind::Array))
            .count();
        prop_assert_eq!(handles.len(), arrays);

        let mut seen = HashSet::new();
        for (_, h) in &handles {
            prop_assert!(seen.insert(h.fields.clone()));
            prop_assert!(seen.insert(h.append.clone()));
            prop_assert!(seen.insert(h.remove.clone()));
            let hook = format!("const {{ fields: {}, append: {}, remove: {} }}", h.fields, h.append, h.remove);
            prop_assert!(component.contains(&hook));
        }
    }
}
