//! Rendering of keyword-argument lists for generated calls.
//!
//! Quoting rules:
//! * the `None` sentinel is emitted bare,
//! * booleans become `True` / `False`, numbers are emitted bare,
//! * every other string becomes a quoted literal,
//! * empty strings and nulls are dropped entirely.
//!
//! Free-form extra options are only emitted under keys that are valid Python
//! identifiers and not already bound by the call.

use crate::compiler::naming::is_identifier;
use itertools::Itertools;
use serde_json::Value;

/// Configuration value meaning "Python's `None`".
pub const NONE_SENTINEL: &str = "None";

/// Quote character used for string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }
}

/// Renders `value` as a Python string literal.
pub fn py_str(value: &str, quote: Quote) -> String {
    let q = quote.as_char();
    let mut out = String::with_capacity(value.len() + 2);
    out.push(q);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(q);
    out
}

/// Renders an optional value as a string literal, or `None` when it is absent or empty.
pub fn py_str_or_none(value: Option<&str>, quote: Quote) -> String {
    match value {
        Some(v) if !v.is_empty() && v != NONE_SENTINEL => py_str(v, quote),
        _ => NONE_SENTINEL.to_string(),
    }
}

/// Makes `value` safe to embed in a single-line `#` comment.
pub fn comment_text(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}

/// An ordered list of `key=value` keyword arguments.
#[derive(Debug, Clone)]
pub struct OptionList {
    quote: Quote,
    fixed: &'static [&'static str],
    entries: Vec<(String, String)>,
}

impl OptionList {
    pub fn new(quote: Quote) -> Self {
        Self {
            quote,
            fixed: &[],
            entries: Vec::new(),
        }
    }

    /// Keyword names the generated call already passes outside this list.
    pub fn with_fixed(mut self, keys: &'static [&'static str]) -> Self {
        self.fixed = keys;
        self
    }

    /// A string option; quoted unless it is the `None` sentinel.
    pub fn text(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        match value {
            None | Some("") => {}
            Some(NONE_SENTINEL) => self.push(key, NONE_SENTINEL.to_string()),
            Some(v) => {
                let literal = py_str(v, self.quote);
                self.push(key, literal);
            }
        }
        self
    }

    /// An option that is emitted bare, such as a pre-rendered token.
    pub fn raw(&mut self, key: &str, token: &str) -> &mut Self {
        if !token.is_empty() {
            self.push(key, token.to_string());
        }
        self
    }

    pub fn flag(&mut self, key: &str, value: Option<bool>) -> &mut Self {
        if let Some(b) = value {
            self.push(key, if b { "True" } else { "False" }.to_string());
        }
        self
    }

    /// An integer option; text that is not an integer falls back to a quoted literal.
    pub fn integer_or_text(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        match value.map(str::trim) {
            Some(v) if v.parse::<i64>().is_ok() => self.raw(key, v),
            other => self.text(key, other),
        }
    }

    /// An option of unknown shape, rendered according to its JSON type.
    pub fn value(&mut self, key: &str, value: &Value) -> &mut Self {
        match value {
            Value::Null => {}
            Value::Bool(b) => {
                self.flag(key, Some(*b));
            }
            Value::Number(n) => {
                self.raw(key, &n.to_string());
            }
            Value::String(s) => {
                self.text(key, Some(s.as_str()));
            }
            other => {
                let json = other.to_string();
                self.text(key, Some(&json));
            }
        }
        self
    }

    /// A user-supplied option. Skipped when `key` is not a Python identifier
    /// or is already bound, either by this list or by the call itself.
    pub fn extra(&mut self, key: &str, value: &Value) -> &mut Self {
        if !is_identifier(key) {
            tracing::warn!(key, "Skipping option that is not a Python identifier");
        } else if self.fixed.contains(&key) || self.contains(key) {
            tracing::warn!(key, "Skipping option that is already set");
        } else {
            self.value(key, value);
        }
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `key=value, key=value`.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .join(", ")
    }

    /// The rendered list prefixed with `, `, or nothing when empty, for
    /// appending after positional arguments.
    pub fn render_trailing(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(", {}", self.render())
        }
    }

    fn push(&mut self, key: &str, rendered: String) {
        self.entries.push((key.to_string(), rendered));
    }
}
