use crate::schema::ValidationReport;
use thiserror::Error;

/// Errors raised while registering or looking up component descriptors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("A component with id '{0}' is already registered")]
    DuplicateDescriptor(String),

    #[error("No component with id '{0}' is registered")]
    NotFound(String),

    #[error("Component '{component}' declares field '{field}' more than once")]
    DuplicateField { component: String, field: String },

    #[error("Field '{field}' of component '{component}' has an invalid validation pattern: {message}")]
    InvalidPattern {
        component: String,
        field: String,
        message: String,
    },
}

/// Errors that can occur while loading a persisted pipeline into its canonical form.
#[derive(Error, Debug, Clone)]
pub enum PipelineError {
    #[error("Failed to parse pipeline JSON: {0}")]
    JsonParse(String),

    #[error("Failed to serialize pipeline JSON: {0}")]
    Serialize(String),

    #[error("Node id '{0}' is used more than once in the pipeline")]
    DuplicateNodeId(String),

    #[error(
        "Node '{missing_node_id}' not found, which is required by a connection from node '{referenced_by}'"
    )]
    NodeNotFound {
        missing_node_id: String,
        referenced_by: String,
    },

    #[error("Node '{node_id}' references an unregistered component type: '{component}'")]
    UnknownDescriptor { node_id: String, component: String },
}

/// Errors a single component generator can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("The generator requires an {0} variable, but none was bound")]
    MissingBinding(&'static str),
}

/// Errors that can occur during the pipeline compilation phase.
///
/// The compiler either returns a complete script or one of these; it never
/// produces partial output.
#[derive(Error, Debug, Clone)]
pub enum CompileError {
    #[error("The pipeline contains a cycle through nodes: {}", nodes.join(", "))]
    Cycle { nodes: Vec<String> },

    #[error("Node '{node_id}' expects an upstream connection, but has none")]
    MissingUpstream { node_id: String },

    #[error("Pipeline configuration is invalid:\n{0}")]
    Validation(ValidationReport),

    #[error("Node '{node_id}' references an unregistered component type: '{component}'")]
    UnknownDescriptor { node_id: String, component: String },

    #[error(
        "Node '{missing_node_id}' not found, which is required by a connection from node '{referenced_by}'"
    )]
    NodeNotFound {
        missing_node_id: String,
        referenced_by: String,
    },

    #[error("A connection on node '{node_id}' is invalid: {message}")]
    Connection { node_id: String, message: String },

    #[error("Configuration of node '{node_id}' does not match its component: {message}")]
    InvalidConfig { node_id: String, message: String },

    #[error("Code generation failed for node '{node_id}': {source}")]
    Generate {
        node_id: String,
        #[source]
        source: GenerateError,
    },
}

/// Errors raised by the pipeline store when applying an edit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Node '{0}' does not exist")]
    UnknownNode(String),

    #[error("Node '{0}' already exists")]
    DuplicateNode(String),

    #[error("Field path '{path}' cannot be set: {message}")]
    InvalidPath { path: String, message: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised while persisting or loading a compiled script artifact.
#[derive(Error, Debug, Clone)]
pub enum ArtifactError {
    #[error("{0}")]
    Generic(String),
}

/// Errors raised while loading the code generation configuration.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read configuration file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Parse(String),
}
