use serde::{Deserialize, Serialize};

/// The form control a field is rendered with.
///
/// Only `Boolean` and `Number` change how a value is emitted in generated code;
/// the other kinds are rendering hints for the form host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Boolean,
    Number,
    SingleSelect,
    MultiSelect,
    Radio,
    FilePath,
    Password,
}

/// One selectable value of a select or radio field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl FieldOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            disabled: false,
        }
    }

    /// A placeholder entry that cannot be picked.
    pub fn disabled(value: &str, label: &str) -> Self {
        Self {
            disabled: true,
            ..Self::new(value, label)
        }
    }
}

/// Declares a single user-settable input of a component.
///
/// `id` is a dotted path into the configuration record, so `csvOptions.sep`
/// addresses `config["csvOptions"]["sep"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub id: String,
    pub kind: FieldKind,
    pub label: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_message: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub advanced: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl FieldSpec {
    pub fn new(id: &str, kind: FieldKind, label: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            label: label.to_string(),
            placeholder: String::new(),
            validation: None,
            validation_message: None,
            required: false,
            advanced: false,
            options: Vec::new(),
        }
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn validation(mut self, pattern: &str, message: &str) -> Self {
        self.validation = Some(pattern.to_string());
        self.validation_message = Some(message.to_string());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn advanced(mut self) -> Self {
        self.advanced = true;
        self
    }

    pub fn options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }
}
