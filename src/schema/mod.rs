//! Declarative configuration schemas.
//!
//! A component declares its user-settable inputs as [`FieldSpec`]s together
//! with a default configuration record. The schema is pure data: it drives the
//! form host and validation, and never generates code itself.

mod field;
pub mod path;
mod validation;

pub use field::*;
pub use validation::*;

use serde_json::Value;
use validation::{check_field, compile_pattern, CompiledPattern};

/// The full set of fields of one component type, plus its defaults.
///
/// Validation patterns are compiled when the schema is built; a pattern that
/// does not compile is reported by [`ConfigSchema::invalid_pattern`] and
/// rejected at registration.
#[derive(Debug, Clone)]
pub struct ConfigSchema {
    fields: Vec<FieldSpec>,
    patterns: Vec<CompiledPattern>,
    pub default_config: Value,
}

impl ConfigSchema {
    pub fn new(fields: Vec<FieldSpec>, default_config: Value) -> Self {
        let patterns = fields.iter().map(compile_pattern).collect();
        Self {
            fields,
            patterns,
            default_config,
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Returns the first field id that is declared more than once, if any.
    pub fn duplicate_field(&self) -> Option<&str> {
        let mut seen = ahash::AHashSet::new();
        self.fields
            .iter()
            .map(|f| f.id.as_str())
            .find(|id| !seen.insert(*id))
    }

    /// The first field whose validation pattern does not compile, with the reason.
    pub fn invalid_pattern(&self) -> Option<(&str, &regex::Error)> {
        self.fields
            .iter()
            .zip(&self.patterns)
            .find_map(|(field, pattern)| pattern.as_ref().err().map(|e| (field.id.as_str(), e)))
    }

    /// Validates `config`, returning the failing fields with their messages.
    pub fn validate(&self, config: &Value) -> FieldErrors {
        self.fields
            .iter()
            .zip(&self.patterns)
            .filter_map(|(field, pattern)| {
                check_field(field, pattern, config).map(|message| (field.id.clone(), message))
            })
            .collect()
    }
}
