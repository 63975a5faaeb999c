use crate::error::ArtifactError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The code contributed by one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCode {
    pub node_id: String,
    pub component: String,
    /// Variable holding the node's result.
    pub variable: String,
    pub code: String,
}

/// A compiled pipeline: deduplicated imports and dependencies, plus one body per node
/// in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedScript {
    pub header: Option<String>,
    pub imports: Vec<String>,
    pub dependencies: Vec<String>,
    pub bodies: Vec<NodeCode>,
}

impl GeneratedScript {
    /// The full script: header comment, imports, then every body separated by a blank line.
    pub fn render(&self) -> String {
        let mut script = String::new();
        if let Some(header) = &self.header {
            for line in header.lines() {
                script.push_str("# ");
                script.push_str(line);
                script.push('\n');
            }
            script.push('\n');
        }
        if !self.imports.is_empty() {
            script.push_str(&self.imports.join("\n"));
            script.push_str("\n\n");
        }
        script.push_str(&self.bodies.iter().map(|b| b.code.as_str()).join("\n"));
        script
    }

    /// Dependencies one per line, in the format of a `requirements.txt`.
    pub fn requirements(&self) -> String {
        self.dependencies
            .iter()
            .map(|d| format!("{}\n", d))
            .collect()
    }

    pub fn body(&self, node_id: &str) -> Option<&NodeCode> {
        self.bodies.iter().find(|b| b.node_id == node_id)
    }

    /// Node ids in the order their code runs.
    pub fn execution_order(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|b| b.node_id.as_str())
    }

    /// Saves the script to a file using the bincode format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let path = path.as_ref();
        fs::write(path, self.to_bytes()?).map_err(|e| {
            ArtifactError::Generic(format!("Could not write to file '{}': {}", path.display(), e))
        })
    }

    /// Loads a script saved with [`save`](Self::save).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            ArtifactError::Generic(format!("Could not read from file '{}': {}", path.display(), e))
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        encode_to_vec(self, standard())
            .map_err(|e| ArtifactError::Generic(format!("Serialization failed: {}", e)))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        decode_from_slice(bytes, standard())
            .map(|(script, _)| script)
            .map_err(|e| ArtifactError::Generic(format!("Deserialization failed: {}", e)))
    }
}
