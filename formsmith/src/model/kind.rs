//! Field kinds and the per-kind profile table.
//!
//! Every compiler pass (validation, defaults, emission) reads the same
//! [`KindProfile`] for a kind, so the artifacts cannot drift apart for any
//! given kind.
//!
//! | Kind | Base | Default | Control |
//! |------|------|---------|---------|
//! | `text`, `email`, `password` | string | `""` | `<Input type=...>` |
//! | `textarea` | string | `""` | `<Textarea>` |
//! | `number` | coerced number | `""` | `<Input type="number">` |
//! | `boolean` | boolean | `false` | `<Checkbox>` |
//! | `select` | one of options | `""` | `<SelectFieldWrapper>` |
//! | `radio` | one of options | `""` | `<RadioGroup>` |
//! | `array` | list | `[]` | field array |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// The closed set of field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    TextArea,
    Boolean,
    Select,
    Radio,
    Array,
}

impl FieldKind {
    /// All kinds in declaration order.
    pub const ALL: [FieldKind; 9] = [
        FieldKind::Text,
        FieldKind::Email,
        FieldKind::Password,
        FieldKind::Number,
        FieldKind::TextArea,
        FieldKind::Boolean,
        FieldKind::Select,
        FieldKind::Radio,
        FieldKind::Array,
    ];

    /// The configuration spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Number => "number",
            FieldKind::TextArea => "textarea",
            FieldKind::Boolean => "boolean",
            FieldKind::Select => "select",
            FieldKind::Radio => "radio",
            FieldKind::Array => "array",
        }
    }

    /// The profile shared by every compiler pass.
    pub fn profile(&self) -> &'static KindProfile {
        match self {
            FieldKind::Text => &TEXT,
            FieldKind::Email => &EMAIL,
            FieldKind::Password => &PASSWORD,
            FieldKind::Number => &NUMBER,
            FieldKind::TextArea => &TEXT_AREA,
            FieldKind::Boolean => &BOOLEAN,
            FieldKind::Select => &SELECT,
            FieldKind::Radio => &RADIO,
            FieldKind::Array => &ARRAY,
        }
    }

    /// Whether the kind validates as a string with length bounds.
    pub fn is_text_like(&self) -> bool {
        matches!(self.profile().base, BaseRule::String)
    }

    /// Whether the kind enumerates its accepted values through `options`.
    pub fn has_options(&self) -> bool {
        matches!(self.profile().base, BaseRule::OneOf)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// The `type` of a parsed field.
///
/// Strict loading only ever produces `Known`. Permissive loading keeps
/// unknown spellings so that each pass can decide how to treat them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Known(FieldKind),
    Unrecognized(String),
}

impl FieldType {
    /// The known kind, if any.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldType::Known(kind) => Some(*kind),
            FieldType::Unrecognized(_) => None,
        }
    }

    /// The configuration spelling.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Known(kind) => kind.as_str(),
            FieldType::Unrecognized(raw) => raw,
        }
    }
}

impl From<FieldKind> for FieldType {
    fn from(kind: FieldKind) -> Self {
        FieldType::Known(kind)
    }
}

impl From<&str> for FieldType {
    fn from(raw: &str) -> Self {
        match raw.parse::<FieldKind>() {
            Ok(kind) => FieldType::Known(kind),
            Err(raw) => FieldType::Unrecognized(raw),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(FieldType::from(raw.as_str()))
    }
}

/// Base validator family of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseRule {
    /// A string, optionally bounded.
    String,
    /// A number coerced from its input representation.
    Number,
    /// A boolean.
    Boolean,
    /// One of the field's `options`.
    OneOf,
    /// A list of items.
    List,
}

/// Initial value rule of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRule {
    /// The empty string (also used for numbers, which round-trip through text inputs).
    EmptyString,
    /// `false`.
    False,
    /// The empty list.
    EmptyList,
}

impl DefaultRule {
    /// The default as a runtime value.
    pub fn value(&self) -> Value {
        match self {
            DefaultRule::EmptyString => Value::String(String::new()),
            DefaultRule::False => Value::Bool(false),
            DefaultRule::EmptyList => Value::Array(Vec::new()),
        }
    }

    /// The default as a TypeScript literal.
    pub fn literal(&self) -> &'static str {
        match self {
            DefaultRule::EmptyString => "''",
            DefaultRule::False => "false",
            DefaultRule::EmptyList => "[]",
        }
    }
}

/// Input control a kind renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// `<Input type="...">`.
    Input { input_type: &'static str },
    /// `<Textarea>`.
    TextArea,
    /// A controlled checkbox.
    Checkbox,
    /// `<SelectFieldWrapper>`.
    Select,
    /// A controlled radio group.
    RadioGroup,
    /// A field array with add/remove buttons.
    FieldArray,
}

/// Everything the compiler passes need to know about one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindProfile {
    pub base: BaseRule,
    pub default: DefaultRule,
    pub control: Control,
    /// `minLength`, `maxLength` and `pattern` apply.
    pub admits_length: bool,
    /// `min` and `max` apply.
    pub admits_range: bool,
    /// The kind may be used as a primitive array item type.
    pub primitive_item: bool,
}

const fn text_profile(control: Control) -> KindProfile {
    KindProfile {
        base: BaseRule::String,
        default: DefaultRule::EmptyString,
        control,
        admits_length: true,
        admits_range: false,
        primitive_item: true,
    }
}

static TEXT: KindProfile = text_profile(Control::Input { input_type: "text" });
static EMAIL: KindProfile = text_profile(Control::Input { input_type: "email" });
static PASSWORD: KindProfile = text_profile(Control::Input {
    input_type: "password",
});
static TEXT_AREA: KindProfile = text_profile(Control::TextArea);

static NUMBER: KindProfile = KindProfile {
    base: BaseRule::Number,
    default: DefaultRule::EmptyString,
    control: Control::Input {
        input_type: "number",
    },
    admits_length: false,
    admits_range: true,
    primitive_item: true,
};

static BOOLEAN: KindProfile = KindProfile {
    base: BaseRule::Boolean,
    default: DefaultRule::False,
    control: Control::Checkbox,
    admits_length: false,
    admits_range: false,
    primitive_item: true,
};

static SELECT: KindProfile = KindProfile {
    base: BaseRule::OneOf,
    default: DefaultRule::EmptyString,
    control: Control::Select,
    admits_length: false,
    admits_range: false,
    primitive_item: false,
};

static RADIO: KindProfile = KindProfile {
    base: BaseRule::OneOf,
    default: DefaultRule::EmptyString,
    control: Control::RadioGroup,
    admits_length: false,
    admits_range: false,
    primitive_item: false,
};

static ARRAY: KindProfile = KindProfile {
    base: BaseRule::List,
    default: DefaultRule::EmptyList,
    control: Control::FieldArray,
    admits_length: false,
    admits_range: false,
    primitive_item: false,
};
