//! Integration tests for formsmith.
//!
//! These run whole forms through the compiler: loading, schema compilation,
//! runtime validation, default synthesis and emission.

use std::fs;
use std::path::PathBuf;

use serde_json::json;

use formsmith::emit::{array_handles, ArtifactEmitter, ComponentEmitter, SchemaEmitter, TypesEmitter};
use formsmith::{
    ArtifactKind, CompileError, DefaultValueTree, EmitterConfig, FieldDescriptor, FieldKind,
    FormCompiler, FormDescriptor, FormError, Identifiers, LineEnding, LoadError, LoadOptions,
    StructuralError,
};

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> String {
    fs::read_to_string(fixtures_path().join(name)).unwrap()
}

fn registration() -> FormDescriptor {
    FormDescriptor::from_json_str(&fixture("registration.json"), LoadOptions::strict()).unwrap()
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_registration_fixture() {
    let form = registration();
    assert_eq!(form.title, "User Registration Form");
    assert_eq!(form.fields.len(), 9);
    assert_eq!(form.field_count(), 12);
    assert_eq!(form.depth(), 1);

    let hobbies = &form.fields[7];
    assert_eq!(hobbies.field_kind(), Some(FieldKind::Array));
    assert_eq!(hobbies.item_kind(), FieldKind::Text);
}

#[test]
fn test_strict_rejects_permissive_fixture() {
    let err = FormDescriptor::from_json_str(&fixture("permissive.json"), LoadOptions::strict())
        .unwrap_err();
    match err {
        LoadError::Structural(StructuralError::UnknownKind { field, kind }) => {
            assert_eq!(field, "when");
            assert_eq!(kind, "date");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_permissive_fixture_degrades_per_field() {
    let form =
        FormDescriptor::from_json_str(&fixture("permissive.json"), LoadOptions::permissive())
            .unwrap();
    assert_eq!(form.fields[0].field_kind(), None);
    assert!(form.fields[1].options.is_empty());
    assert_eq!(form.fields[2].label, "note");
    assert!(form.fields[2].children.is_empty());

    // schema compilation refuses unknown kinds
    let err = FormCompiler::default().compile(&form).unwrap_err();
    assert!(matches!(
        err,
        FormError::Compile(CompileError::UnknownKind { .. })
    ));

    // defaults and emitters degrade instead
    let defaults = DefaultValueTree::for_form(&form);
    assert_eq!(defaults.get("when"), Some(&json!("")));

    let ids = Identifiers::from_title(&form.title).unwrap();
    let config = EmitterConfig::default();
    let schema = SchemaEmitter::new().emit(&form, &ids, &config);
    assert!(schema
        .content
        .contains("// Unsupported field type: \"date\" for field \"when\""));
    assert!(schema.content.contains("  color: z.never().optional(),\n"));

    let component = ComponentEmitter::new().emit(&form, &ids, &config);
    assert!(component
        .content
        .contains("{/* Unsupported field type: \"date\" for field \"when\" */}"));
}

#[test]
fn test_malformed_json_is_a_load_error() {
    let err = FormCompiler::default()
        .compile_str("{\"title\": ", LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, FormError::Load(LoadError::Json(_))));
    assert!(err.to_string().starts_with("Invalid configuration: malformed JSON"));
}

#[test]
fn test_duplicate_names_rejected_in_both_modes() {
    let json = r#"{
        "title": "Dupes",
        "fields": [
            { "name": "a", "type": "text", "label": "A" },
            { "name": "a", "type": "text", "label": "A again" }
        ]
    }"#;
    for options in [LoadOptions::strict(), LoadOptions::permissive()] {
        let err = FormDescriptor::from_json_str(json, options).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Structural(StructuralError::DuplicateName { .. })
        ));
    }
}

// =============================================================================
// Runtime validation
// =============================================================================

#[test]
fn test_round_trip_scenario() {
    let form = FormDescriptor::new(
        "User Registration Form",
        vec![
            FieldDescriptor::new("firstName", FieldKind::Text, "First Name")
                .required()
                .with_constraints(
                    formsmith::model::ValidationConstraints::new()
                        .with_min_length(2)
                        .with_max_length(50),
                ),
            FieldDescriptor::new("age", FieldKind::Number, "Age")
                .required()
                .with_constraints(
                    formsmith::model::ValidationConstraints::new()
                        .with_min(18.0)
                        .with_max(100.0),
                ),
        ],
    );
    let compiled = FormCompiler::default().compile(&form).unwrap();

    assert!(compiled
        .schema
        .validate(&json!({ "firstName": "Al", "age": 18 }))
        .is_valid());

    let result = compiled.schema.validate(&json!({ "firstName": "A", "age": 17 }));
    assert!(!result.is_valid());
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].field, "firstName");
    assert_eq!(result.errors[0].message, "Minimum 2 characters required");
    assert_eq!(result.errors[1].field, "age");
    assert_eq!(result.errors[1].message, "Minimum value is 18");
}

#[test]
fn test_nested_scenario() {
    let json = r#"{
        "title": "Shipping",
        "fields": [{
            "name": "addresses",
            "type": "array",
            "label": "Addresses",
            "fields": [
                { "name": "street", "type": "text", "label": "Street", "required": true },
                { "name": "city", "type": "text", "label": "City", "required": true },
                { "name": "zipCode", "type": "text", "label": "Zip Code", "required": true }
            ]
        }]
    }"#;
    let compiled = FormCompiler::default()
        .compile_str(json, LoadOptions::default())
        .unwrap();

    let result = compiled.schema.validate(&json!({
        "addresses": [{ "street": "", "city": "X", "zipCode": "1" }]
    }));
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].field, "addresses.0.street");
    assert_eq!(result.errors[0].message, "Street is required");

    assert!(compiled.schema.validate(&json!({ "addresses": [] })).is_valid());
    assert!(compiled.schema.validate(&json!({})).is_valid());
}

#[test]
fn test_registration_accepts_complete_submission() {
    let compiled = FormCompiler::default().compile(&registration()).unwrap();
    let result = compiled.schema.validate(&json!({
        "firstName": "Ada",
        "email": "ada@example.com",
        "age": "36",
        "bio": "",
        "newsletter": false,
        "role": "Developer",
        "country": null,
        "hobbies": ["chess"],
        "addresses": [{ "street": "1 Main St", "city": "Springfield", "primary": true }]
    }));
    assert!(result.is_valid(), "{:?}", result.errors);
}

#[test]
fn test_registration_rejects_its_own_defaults() {
    let compiled = FormCompiler::default().compile(&registration()).unwrap();
    let result = compiled.schema.validate(&compiled.defaults.clone().into_value());

    let fields: Vec<_> = result.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(
        fields,
        ["firstName", "email", "age", "role", "country", "addresses"]
    );
    let by_field = result.errors_by_field();
    assert_eq!(by_field["firstName"][0].message, "First Name is required");
    assert_eq!(by_field["age"][0].message, "Age is required");
    assert_eq!(
        by_field["role"][0].message,
        "Role must be one of the available options"
    );
    assert_eq!(
        by_field["addresses"][0].message,
        "At least one addresses is required"
    );
}

#[test]
fn test_registration_item_errors() {
    let compiled = FormCompiler::default().compile(&registration()).unwrap();
    let result = compiled.schema.validate(&json!({
        "firstName": "Ada",
        "email": "not-an-email",
        "age": "abc",
        "role": "Developer",
        "hobbies": ["chess", ""],
        "addresses": [{ "street": "1 Main St", "city": "" }]
    }));

    let codes: Vec<_> = result
        .errors
        .iter()
        .map(|e| (e.field.as_str(), e.code.as_str()))
        .collect();
    assert_eq!(
        codes,
        [
            ("email", "email"),
            ("age", "invalid_number"),
            ("hobbies.1", "required"),
            ("addresses.0.city", "required"),
        ]
    );
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_registration_defaults() {
    let compiled = FormCompiler::default().compile(&registration()).unwrap();
    let keys: Vec<_> = compiled.defaults.keys().collect();
    assert_eq!(
        keys,
        [
            "firstName",
            "email",
            "age",
            "bio",
            "newsletter",
            "role",
            "country",
            "hobbies",
            "addresses"
        ]
    );
    assert_eq!(compiled.defaults.get("age"), Some(&json!("")));
    assert_eq!(compiled.defaults.get("newsletter"), Some(&json!(false)));
    assert_eq!(compiled.defaults.get("addresses"), Some(&json!([])));
    assert_eq!(
        serde_json::to_string(&compiled.defaults).unwrap(),
        r#"{"firstName":"","email":"","age":"","bio":"","newsletter":false,"role":"","country":"","hobbies":[],"addresses":[]}"#
    );
}

// =============================================================================
// Emission
// =============================================================================

#[test]
fn test_registration_artifacts() {
    let compiled = FormCompiler::default().compile(&registration()).unwrap();
    let names: Vec<_> = compiled
        .artifacts
        .iter()
        .map(|a| a.file_name.as_str())
        .collect();
    assert_eq!(names, ["UserRegistrationForm.tsx", "schema.ts", "types.ts"]);

    let component = &compiled.artifact(ArtifactKind::Component).unwrap().content;
    assert!(component.contains("const UserRegistrationForm: React.FC<UserRegistrationFormProps>"));
    assert!(component.contains("resolver: zodResolver(userRegistrationFormSchema),"));
    // literal label, placeholder and helper text survive
    assert!(component.contains("placeholder=\"Enter your first name\""));
    assert!(component.contains("helperText=\"We'll never share your email\""));
    assert!(component.contains("placeholder=\"Enter email address\""));
    assert!(component.contains("label=\"Subscribe to newsletter\""));
}

#[test]
fn test_hobbies_handles_are_unique() {
    let form = registration();
    let compiled = FormCompiler::default().compile(&form).unwrap();
    let component = &compiled.artifact(ArtifactKind::Component).unwrap().content;

    let handles = array_handles(&form.fields);
    assert_eq!(handles.len(), 2);
    let (_, hobbies) = &handles[0];
    let (_, addresses) = &handles[1];
    assert_eq!(hobbies.fields, "hobbiesFields");
    assert_ne!(hobbies.fields, addresses.fields);
    assert_ne!(hobbies.append, addresses.append);
    assert_ne!(hobbies.remove, addresses.remove);

    assert!(component.contains(
        "const { fields: hobbiesFields, append: hobbiesAppend, remove: hobbiesRemove } = useFieldArray({"
    ));
    assert!(component.contains("onClick={() => hobbiesAppend('')}"));
    assert!(component.contains("onClick={() => addressesAppend({ street: '', city: '', primary: false })}"));
    assert_eq!(component.matches("name: 'hobbies',").count(), 1);
}

#[test]
fn test_emission_respects_line_endings() {
    let compiler = FormCompiler::new(EmitterConfig::new().with_line_ending(LineEnding::CrLf));
    let compiled = compiler.compile(&registration()).unwrap();
    for artifact in &compiled.artifacts {
        let bare_lf = artifact.content.replace("\r\n", "");
        assert!(!bare_lf.contains('\n'), "{} has bare LF", artifact.file_name);
    }
}

#[test]
fn test_emitters_agree_on_names() {
    let form = registration();
    let ids = Identifiers::from_title(&form.title).unwrap();
    let config = EmitterConfig::default();
    let schema = SchemaEmitter::new().emit(&form, &ids, &config).content;
    let types = TypesEmitter::new().emit(&form, &ids, &config).content;

    assert!(schema.contains("export type UserRegistrationFormFormData"));
    assert!(types.contains("export interface UserRegistrationFormFormData"));
}

#[test]
fn test_compiled_schema_serializes() {
    let compiled = FormCompiler::default().compile(&registration()).unwrap();
    let value = serde_json::to_value(&compiled.schema).unwrap();
    assert!(value.get("root").is_some());
    assert!(value.get("warnings").is_none());
}
