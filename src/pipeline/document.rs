use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The persisted pipeline format, as saved by the canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineDocument {
    pub nodes: Vec<DocumentNode>,
    #[serde(default)]
    pub edges: Vec<DocumentEdge>,
}

/// A node as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    pub id: String,
    #[serde(rename = "type")]
    pub component: String,
    #[serde(default)]
    pub data: DocumentNodeData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentNodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub config: Value,
}

/// A connection as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEdge {
    pub source: String,
    pub target: String,
    #[serde(
        default,
        rename = "sourceHandle",
        alias = "source_handle",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_handle: Option<String>,
    #[serde(
        default,
        rename = "targetHandle",
        alias = "target_handle",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_handle: Option<String>,
}

impl DocumentEdge {
    /// Index of the target handle, e.g. `2` for `input-2`. Defaults to 0.
    pub fn target_index(&self) -> u32 {
        self.target_handle
            .as_deref()
            .and_then(|h| h.rsplit('-').next())
            .and_then(|idx| idx.parse().ok())
            .unwrap_or(0)
    }
}
