use super::{de, resolve_as, PANDAS_IMPORT};
use crate::component::{Bindings, Category, CodeGenerator, ComponentDescriptor};
use crate::error::GenerateError;
use crate::schema::{ConfigSchema, FieldKind, FieldSpec};
use serde::Deserialize;
use serde_json::json;

pub const ID: &str = "console";

/// Terminal sink printing the incoming data frame.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    #[serde(deserialize_with = "de::opt_string")]
    pub limit: Option<String>,
}

impl ConsoleConfig {
    /// Number of records to print, if a whole-number limit is set.
    ///
    /// The digits are kept verbatim so that limits of any size survive;
    /// leading zeros are dropped since Python rejects them.
    pub fn record_limit(&self) -> Option<&str> {
        let digits = self.limit.as_deref()?.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match digits.trim_start_matches('0') {
            "" => Some("0"),
            significant => Some(significant),
        }
    }
}

impl CodeGenerator for ConsoleConfig {
    fn imports(&self) -> Vec<String> {
        vec![PANDAS_IMPORT.to_string()]
    }

    fn generate(&self, bindings: &Bindings<'_>) -> Result<String, GenerateError> {
        let input = bindings.input()?;
        Ok(match self.record_limit() {
            Some(limit) => format!("print({}.head({}))\n", input, limit),
            None => format!("print({})\n", input),
        })
    }
}

pub fn descriptor() -> ComponentDescriptor {
    let fields = vec![
        FieldSpec::new("limit", FieldKind::Number, "Records limit")
            .placeholder("Number of records to print in console")
            .validation(r"^[0-9]+$", "The records limit must be a whole number."),
    ];

    ComponentDescriptor::new(
        ID,
        "Console",
        Category::Output,
        ConfigSchema::new(fields, json!({})),
        resolve_as::<ConsoleConfig>,
    )
    .with_icon("monitor")
}
