//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the pipeforge crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use pipeforge::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let registry = ComponentRegistry::with_defaults()?;
//! let pipeline_json = std::fs::read_to_string("path/to/pipeline.json")?;
//! let pipeline = Pipeline::from_json(&pipeline_json, &registry)?;
//!
//! let script = Compiler::new(&registry).compile(&pipeline)?;
//! println!("{}", script.render());
//! # Ok(())
//! # }
//! ```

// Compilation
pub use crate::compiler::{Compiler, CompilerBuilder, GeneratedScript, NodeCode};
pub use crate::config::CodegenConfig;

// Components
pub use crate::component::{
    Bindings, Category, CodeGenerator, ComponentDescriptor, ComponentRegistry, DataType,
};
pub use crate::components::ComponentConfig;
pub use crate::schema::{ConfigSchema, FieldKind, FieldOption, FieldSpec, ValidationReport};

// Pipelines
pub use crate::pipeline::{
    EditEvent, IntoPipeline, Pipeline, PipelineDocument, PipelineNode, PipelineStore,
};

// Console
pub use crate::console::{LogConsole, LogEntry, LogLevel};

// Error types
pub use crate::error::{
    ArtifactError, CompileError, ConfigError, EditError, GenerateError, PipelineError,
    RegistryError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
