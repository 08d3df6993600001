//! User-facing validation messages.
//!
//! Shared by the runtime validators and the emitted zod source so both
//! report the same text.

use crate::model::field::format_number;

pub const EMAIL: &str = "Please enter a valid email address";
pub const PATTERN: &str = "Please enter a valid format";
pub const INVALID_NUMBER: &str = "Please enter a valid number";
/// Empty primitive array item.
pub const ITEM_REQUIRED: &str = "This field is required";

pub fn required(label: &str) -> String {
    format!("{} is required", label)
}

pub fn must_be_checked(label: &str) -> String {
    format!("{} must be checked", label)
}

pub fn min_length(n: usize) -> String {
    format!("Minimum {} characters required", n)
}

pub fn max_length(n: usize) -> String {
    format!("Maximum {} characters allowed", n)
}

pub fn min_value(n: f64) -> String {
    format!("Minimum value is {}", format_number(n))
}

pub fn max_value(n: f64) -> String {
    format!("Maximum value is {}", format_number(n))
}

pub fn min_items(label: &str) -> String {
    format!("At least one {} is required", label.to_lowercase())
}

pub fn invalid_option(label: &str) -> String {
    format!("{} must be one of the available options", label)
}
