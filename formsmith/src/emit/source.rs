//! Source text building blocks shared by the emitters.

use serde_json::Value;

use super::traits::EmitterConfig;

/// Line-oriented source builder.
///
/// Every line is written at an explicit depth; there is no implicit
/// indentation state to keep in sync.
#[derive(Debug)]
pub struct SourceWriter<'a> {
    config: &'a EmitterConfig,
    buf: String,
}

impl<'a> SourceWriter<'a> {
    pub fn new(config: &'a EmitterConfig) -> Self {
        Self {
            config,
            buf: String::new(),
        }
    }

    /// Write one line at `depth`. Empty lines carry no indentation.
    pub fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.buf.push_str(&self.config.indent.indent(depth));
            self.buf.push_str(text);
        }
        self.buf.push_str(self.config.line_ending.as_str());
    }

    pub fn blank(&mut self) {
        self.line(0, "");
    }

    /// Write a multi-line block, shifting every line by `depth`.
    pub fn block(&mut self, depth: usize, text: &str) {
        for line in text.lines() {
            self.line(depth, line);
        }
    }

    /// Append text produced by another writer with the same config.
    pub fn append(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Escape a string for a single-quoted TypeScript literal.
pub fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// A single-quoted TypeScript string literal.
pub fn quote(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Escape a regex source for a `/.../` literal.
pub fn escape_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut escaped = false;
    for c in pattern.chars() {
        if c == '/' && !escaped {
            out.push('\\');
        }
        escaped = c == '\\' && !escaped;
        out.push(c);
    }
    out
}

/// Escape text placed inside a template literal.
pub fn escape_template(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Whether `s` is a plain JavaScript identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// An object key, quoted when it is not an identifier.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

/// A JSX attribute value: `"text"`, or `{'text'}` when the text cannot
/// appear inside a JSX string.
pub fn jsx_attr(s: &str) -> String {
    if s.contains(&['"', '\\', '\n', '\r'][..]) {
        format!("{{{}}}", quote(s))
    } else {
        format!("\"{}\"", s)
    }
}

/// JSX child text, wrapped in an expression when it contains markup
/// characters.
pub fn jsx_text(s: &str) -> String {
    if s.contains(&['{', '}', '<', '>'][..]) {
        format!("{{{}}}", quote(s))
    } else {
        s.to_string()
    }
}

/// Text safe to place inside a `/* ... */` comment.
pub fn comment_text(s: &str) -> String {
    s.replace("*/", "* /")
}

/// A JSON value as a TypeScript literal.
pub fn ts_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(items) => {
            let items: Vec<_> = items.iter().map(ts_literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let entries: Vec<_> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", property_key(k), ts_literal(v)))
                .collect();
            format!("{{ {} }}", entries.join(", "))
        }
    }
}
