//! Code generation settings, read from a TOML file.
//!
//! ```toml
//! [codegen]
//! header = "Generated by pipeforge"
//! validate = true
//! warn_on_dangling = true
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings that shape a compilation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    /// Comment placed at the top of the rendered script.
    pub header: Option<String>,
    /// Check field patterns before generating. Disabling this is meant for previews only.
    pub validate: bool,
    /// Log a warning for non-terminal nodes nobody consumes.
    pub warn_on_dangling: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            header: None,
            validate: true,
            warn_on_dangling: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    codegen: CodegenConfig,
}

impl CodegenConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str::<ConfigFile>(content)
            .map(|file| file.codegen)
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}
