//! Identifier derivation from form titles.
//!
//! `"User Registration Form"` becomes the type identifier
//! `UserRegistrationForm` and the value identifier `userRegistrationForm`.
//! Casing goes through `convert_case`, so acronyms are normalized
//! (`"the HTML editor"` becomes `TheHtmlEditor`). Deriving from an
//! identifier returns it unchanged.

use convert_case::{Case, Casing};
use serde::Serialize;
use tracing::trace;

use crate::error::IdentifierError;

/// Names derived from a form title and used across all emitted artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifiers {
    /// PascalCase name, e.g. `UserRegistrationForm`.
    pub type_name: String,

    /// camelCase name, e.g. `userRegistrationForm`.
    pub value_name: String,
}

impl Identifiers {
    /// Derive both identifiers from a title.
    pub fn from_title(title: &str) -> Result<Self, IdentifierError> {
        let type_name = derive_type_identifier(title)?;
        let value_name = type_name.to_case(Case::Camel);
        trace!(title, type_name = %type_name, "derived identifiers");
        Ok(Self {
            type_name,
            value_name,
        })
    }

    /// Name of the exported zod schema constant.
    pub fn schema_name(&self) -> String {
        format!("{}Schema", self.value_name)
    }

    /// Name of the form data type.
    pub fn form_data_type(&self) -> String {
        format!("{}FormData", self.type_name)
    }

    /// Name of the React component.
    pub fn component_name(&self) -> &str {
        &self.type_name
    }

    /// Name of the component props interface.
    pub fn props_name(&self) -> String {
        format!("{}Props", self.type_name)
    }

    /// File name of the component artifact.
    pub fn component_file(&self) -> String {
        format!("{}.tsx", self.type_name)
    }
}

/// Derive the type-style identifier of a title.
pub fn derive_type_identifier(title: &str) -> Result<String, IdentifierError> {
    if title.trim().is_empty() {
        return Err(IdentifierError::EmptyTitle);
    }

    let words: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    // identifiers cannot start with a digit
    let words = words.trim_start_matches(|c: char| !c.is_ascii_alphabetic());
    if words.is_empty() {
        return Err(IdentifierError::NoLetters(title.to_string()));
    }

    // one pass can leave merged single-letter words ("a b cd" -> "ABCd"),
    // so convert until the result is stable
    let mut ident = words.to_case(Case::Pascal);
    loop {
        let next = ident.to_case(Case::Pascal);
        if next == ident {
            return Ok(ident);
        }
        ident = next;
    }
}

/// Derive the value-style identifier of a title.
pub fn derive_value_identifier(title: &str) -> Result<String, IdentifierError> {
    derive_type_identifier(title).map(|ident| ident.to_case(Case::Camel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_type_identifier() {
        assert_eq!(
            derive_type_identifier("User Registration Form").unwrap(),
            "UserRegistrationForm"
        );
        assert_eq!(derive_type_identifier("contact-us form").unwrap(), "ContactUsForm");
        assert_eq!(derive_type_identifier("  my_form  ").unwrap(), "MyForm");
    }

    #[test]
    fn test_acronyms_normalized() {
        assert_eq!(derive_type_identifier("ABForm").unwrap(), "AbForm");
        assert_eq!(derive_type_identifier("the HTML editor").unwrap(), "TheHtmlEditor");
        assert_eq!(derive_type_identifier("userID form").unwrap(), "UserIdForm");
    }

    #[test]
    fn test_single_letter_words_are_stable() {
        let ident = derive_type_identifier("a b cd").unwrap();
        assert_eq!(ident, "AbCd");
        assert_eq!(derive_type_identifier(&ident).unwrap(), ident);
        assert_eq!(derive_value_identifier("a b cd").unwrap(), "abCd");
    }

    #[test]
    fn test_leading_digits_dropped() {
        assert_eq!(derive_type_identifier("2024 Survey").unwrap(), "Survey");
        assert_eq!(derive_type_identifier("Q3 Report").unwrap(), "Q3Report");
    }

    #[test]
    fn test_value_identifier() {
        assert_eq!(
            derive_value_identifier("User Registration Form").unwrap(),
            "userRegistrationForm"
        );
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(derive_type_identifier(""), Err(IdentifierError::EmptyTitle));
        assert_eq!(derive_type_identifier("   "), Err(IdentifierError::EmptyTitle));
    }

    #[test]
    fn test_title_without_letters() {
        assert_eq!(
            derive_type_identifier("123 - 456"),
            Err(IdentifierError::NoLetters("123 - 456".to_string()))
        );
        assert!(derive_type_identifier("!!!").is_err());
    }

    #[test]
    fn test_derived_names() {
        let ids = Identifiers::from_title("User Registration Form").unwrap();
        assert_eq!(ids.schema_name(), "userRegistrationFormSchema");
        assert_eq!(ids.form_data_type(), "UserRegistrationFormFormData");
        assert_eq!(ids.component_name(), "UserRegistrationForm");
        assert_eq!(ids.props_name(), "UserRegistrationFormProps");
        assert_eq!(ids.component_file(), "UserRegistrationForm.tsx");
    }

    proptest! {
        /// Deriving from an already derived identifier yields the same identifier.
        #[test]
        fn prop_type_identifier_idempotent(title in "[ -~]{1,40}") {
            if let Ok(ident) = derive_type_identifier(&title) {
                prop_assert_eq!(derive_type_identifier(&ident).unwrap(), ident.clone());
                prop_assert!(ident.chars().all(|c| c.is_ascii_alphanumeric()));
                prop_assert!(ident.chars().next().map_or(false, |c| c.is_ascii_uppercase()));
            }
        }

        #[test]
        fn prop_value_identifier_idempotent(title in "[a-zA-Z0-9 _-]{1,40}") {
            if let Ok(ident) = derive_value_identifier(&title) {
                prop_assert_eq!(derive_value_identifier(&ident).unwrap(), ident);
            }
        }
    }
}
