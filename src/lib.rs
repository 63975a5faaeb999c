//! # pipeforge - Pipeline Code Generation Engine
//!
//! **pipeforge** compiles visual ETL pipelines into runnable pandas scripts.
//! A pipeline is a directed acyclic graph of component instances (file
//! readers and writers, database and spreadsheet connectors, console sinks);
//! every component type describes its configuration form declaratively and
//! knows how to turn a finished configuration into a fragment of Python.
//!
//! ## Core Workflow
//!
//! 1.  **Build a Registry**: `ComponentRegistry::with_defaults()` knows every built-in component.
//! 2.  **Load a Pipeline**: parse a saved pipeline with `Pipeline::from_json`, implement
//!     `IntoPipeline` for your own format, or build one up from `EditEvent`s in a `PipelineStore`.
//! 3.  **Compile**: `Compiler::new(&registry).compile(&pipeline)` checks the graph, validates
//!     every field, orders the nodes, assigns unique variables and generates the code.
//! 4.  **Use the Script**: `GeneratedScript::render` yields the script text and
//!     `requirements` its external dependencies.
//!
//! ## Quick Start
//!
//! ```rust
//! use pipeforge::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let registry = ComponentRegistry::with_defaults()?;
//!
//!     let pipeline = Pipeline::new()
//!         .with_node(
//!             PipelineNode::new(
//!                 "1",
//!                 "csvFileInput",
//!                 json!({ "filePath": "input.csv", "csvOptions": { "sep": "," } }),
//!             )
//!             .with_label("Orders"),
//!         )
//!         .with_node(PipelineNode::new("2", "console", json!({ "limit": "5" })))
//!         .with_edge("1", "2");
//!
//!     let script = Compiler::new(&registry).compile(&pipeline)?;
//!     assert!(script.render().contains("Orders = pd.read_csv('input.csv', sep=',')"));
//!     assert!(script.render().contains("print(Orders.head(5))"));
//!     Ok(())
//! }
//! ```

pub mod compiler;
pub mod component;
pub mod components;
pub mod config;
pub mod console;
pub mod error;
pub mod pipeline;
pub mod prelude;
pub mod schema;
