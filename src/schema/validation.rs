use super::path::{get_path, value_as_text};
use super::FieldSpec;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

const REQUIRED_MESSAGE: &str = "This field is required.";

/// Field-level failures of one configuration record, keyed by field id.
pub type FieldErrors = BTreeMap<String, String>;

/// A field's validation pattern, compiled once when its schema is built.
pub(crate) type CompiledPattern = Result<Option<Regex>, regex::Error>;

pub(crate) fn compile_pattern(field: &FieldSpec) -> CompiledPattern {
    field.validation.as_deref().map(Regex::new).transpose()
}

/// Checks one field of `config`, returning its failure message.
///
/// Empty values only fail when the field is required; non-empty values must
/// match the field's pattern if it declares one.
pub(crate) fn check_field(
    field: &FieldSpec,
    pattern: &CompiledPattern,
    config: &Value,
) -> Option<String> {
    let text = value_as_text(get_path(config, &field.id));
    if text.is_empty() {
        return field.required.then(|| REQUIRED_MESSAGE.to_string());
    }

    match pattern {
        Ok(Some(re)) if !re.is_match(&text) => Some(
            field
                .validation_message
                .clone()
                .unwrap_or_else(|| format!("Value does not match the pattern {}", re.as_str())),
        ),
        Ok(_) => None,
        Err(e) => Some(format!("Field declares an invalid validation pattern: {}", e)),
    }
}

/// Validation failures across a whole pipeline: node id -> field id -> message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    nodes: BTreeMap<String, FieldErrors>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the errors of one node. Empty error maps are ignored.
    pub fn insert(&mut self, node_id: &str, errors: FieldErrors) {
        if !errors.is_empty() {
            self.nodes.insert(node_id.to_string(), errors);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, node_id: &str) -> Option<&FieldErrors> {
        self.nodes.get(node_id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&String, &FieldErrors)> {
        self.nodes.iter()
    }

    /// Total number of failing fields.
    pub fn len(&self) -> usize {
        self.nodes.values().map(|e| e.len()).sum()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node_id, errors) in &self.nodes {
            for (field_id, message) in errors {
                writeln!(f, "  {}.{}: {}", node_id, field_id, message)?;
            }
        }
        Ok(())
    }
}
