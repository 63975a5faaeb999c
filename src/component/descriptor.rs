use crate::components::ComponentConfig;
use crate::schema::ConfigSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Palette category of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Input,
    Output,
    Transform,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Input => write!(f, "input"),
            Category::Output => write!(f, "output"),
            Category::Transform => write!(f, "transform"),
        }
    }
}

/// The kind of data a component exchanges, used by the canvas to decide
/// which handles may be connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataType {
    TabularInput,
    TabularOutput,
    TabularTransform,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::TabularInput => write!(f, "tabular-input"),
            DataType::TabularOutput => write!(f, "tabular-output"),
            DataType::TabularTransform => write!(f, "tabular-transform"),
        }
    }
}

/// Turns an opaque configuration record into the typed configuration of one component kind.
pub type ConfigResolver = fn(&Value) -> Result<ComponentConfig, serde_json::Error>;

/// Immutable metadata of one component type.
///
/// Exactly one descriptor exists per type; nodes refer to it by `id` and
/// never mutate it.
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub data_type: DataType,
    pub icon: String,
    /// File extensions the canvas accepts as drops for this component.
    pub file_drop: Vec<String>,
    /// Maximum number of upstream connections.
    pub inputs: usize,
    /// Whether downstream nodes may consume this component's variable.
    pub produces_output: bool,
    pub schema: ConfigSchema,
    resolver: ConfigResolver,
}

impl ComponentDescriptor {
    pub fn new(
        id: &str,
        name: &str,
        category: Category,
        schema: ConfigSchema,
        resolver: ConfigResolver,
    ) -> Self {
        let (data_type, inputs, produces_output) = match category {
            Category::Input => (DataType::TabularInput, 0, true),
            Category::Output => (DataType::TabularOutput, 1, false),
            Category::Transform => (DataType::TabularTransform, 1, true),
        };
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            data_type,
            icon: String::new(),
            file_drop: Vec::new(),
            inputs,
            produces_output,
            schema,
            resolver,
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    pub fn with_file_drop(mut self, extensions: &[&str]) -> Self {
        self.file_drop = extensions.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn with_inputs(mut self, inputs: usize) -> Self {
        self.inputs = inputs;
        self
    }

    /// Re-registers the same component under another id, e.g. for a legacy type name.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// A fresh copy of the default configuration for a new node.
    pub fn default_config(&self) -> Value {
        self.schema.default_config.clone()
    }

    pub fn is_source(&self) -> bool {
        self.inputs == 0
    }

    pub fn is_terminal(&self) -> bool {
        !self.produces_output
    }

    /// Resolves a node's configuration record into its typed form.
    pub fn resolve(&self, config: &Value) -> Result<ComponentConfig, serde_json::Error> {
        (self.resolver)(config)
    }
}
