use crate::component::{Bindings, CodeGenerator, ComponentDescriptor, ComponentRegistry};
use crate::components::ComponentConfig;
use crate::config::CodegenConfig;
use crate::error::CompileError;
use crate::pipeline::Pipeline;
use crate::schema::ValidationReport;
use itertools::Itertools;
use tracing::{debug, info, warn};

mod graph;
pub mod naming;
mod script;

use graph::Graph;
use naming::{assign_unique_with_helpers, sanitize_identifier};
pub use script::*;

/// Compiles pipelines into [`GeneratedScript`]s.
///
/// A compiler borrows the registry it resolves components from; it holds no
/// per-pipeline state and can compile any number of pipelines.
pub struct Compiler<'r> {
    registry: &'r ComponentRegistry,
    config: CodegenConfig,
}

pub struct CompilerBuilder<'r> {
    registry: &'r ComponentRegistry,
    config: CodegenConfig,
}

impl<'r> CompilerBuilder<'r> {
    pub fn new(registry: &'r ComponentRegistry) -> Self {
        Self {
            registry,
            config: CodegenConfig::default(),
        }
    }
    pub fn with_config(mut self, config: CodegenConfig) -> Self {
        self.config = config;
        self
    }
    pub fn with_header(mut self, header: &str) -> Self {
        self.config.header = Some(header.to_string());
        self
    }
    pub fn skip_validation(mut self) -> Self {
        self.config.validate = false;
        self
    }
    pub fn build(self) -> Compiler<'r> {
        Compiler {
            registry: self.registry,
            config: self.config,
        }
    }
}

/// A pipeline that passed every structural check, with its nodes resolved.
struct CheckedPipeline<'p, 'r> {
    pipeline: &'p Pipeline,
    descriptors: Vec<&'r ComponentDescriptor>,
    configs: Vec<ComponentConfig>,
    graph: Graph,
    order: Vec<usize>,
}

impl<'r> Compiler<'r> {
    pub fn new(registry: &'r ComponentRegistry) -> Self {
        CompilerBuilder::new(registry).build()
    }

    pub fn builder(registry: &'r ComponentRegistry) -> CompilerBuilder<'r> {
        CompilerBuilder::new(registry)
    }

    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Runs every check `compile` runs, without generating code.
    pub fn validate(&self, pipeline: &Pipeline) -> Result<(), CompileError> {
        let checked = self.check(pipeline)?;
        self.validate_fields(&checked)
    }

    /// Compiles a pipeline into one script.
    ///
    /// Either every node contributes its body or the whole compilation fails;
    /// no partial script is ever returned.
    pub fn compile(&self, pipeline: &Pipeline) -> Result<GeneratedScript, CompileError> {
        info!(nodes = pipeline.nodes.len(), "compiling pipeline");
        let checked = self.check(pipeline)?;
        if self.config.validate {
            self.validate_fields(&checked)?;
        }

        let variables = self.assign_variables(&checked);

        let mut imports = Vec::new();
        let mut dependencies = Vec::new();
        let mut bodies = Vec::with_capacity(checked.order.len());
        for &index in &checked.order {
            let node = &pipeline.nodes[index];
            let config = &checked.configs[index];
            let input = checked.graph.upstream[index]
                .first()
                .map(|&source| variables[source].as_str());
            let output = variables[index].as_str();

            let code = config
                .generate(&Bindings::new(input, Some(output)))
                .map_err(|source| CompileError::Generate {
                    node_id: node.id.clone(),
                    source,
                })?;
            debug!(node = %node.id, variable = output, "generated node body");

            imports.extend(config.imports());
            dependencies.extend(config.dependencies());
            bodies.push(NodeCode {
                node_id: node.id.clone(),
                component: node.component.clone(),
                variable: output.to_string(),
                code,
            });
        }

        let script = GeneratedScript {
            header: self.config.header.clone(),
            imports: imports.into_iter().unique().collect(),
            dependencies: dependencies.into_iter().unique().collect(),
            bodies,
        };
        info!(
            bodies = script.bodies.len(),
            imports = script.imports.len(),
            dependencies = script.dependencies.len(),
            "compilation finished"
        );
        Ok(script)
    }

    /// Structural checks, in order: registered components, connection targets
    /// and arity, acyclicity, required upstreams, and config shape.
    fn check<'p>(&self, pipeline: &'p Pipeline) -> Result<CheckedPipeline<'p, 'r>, CompileError> {
        let descriptors = pipeline
            .nodes
            .iter()
            .map(|node| {
                self.registry
                    .get(&node.component)
                    .map_err(|_| CompileError::UnknownDescriptor {
                        node_id: node.id.clone(),
                        component: node.component.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let graph = Graph::build(pipeline)?;
        for (index, node) in pipeline.nodes.iter().enumerate() {
            let descriptor = descriptors[index];
            if graph.upstream[index].len() > descriptor.inputs {
                return Err(CompileError::Connection {
                    node_id: node.id.clone(),
                    message: format!(
                        "{} accepts at most {} input(s), but {} are connected",
                        descriptor.name,
                        descriptor.inputs,
                        graph.upstream[index].len()
                    ),
                });
            }
            if descriptor.is_terminal() && !graph.consumers[index].is_empty() {
                return Err(CompileError::Connection {
                    node_id: node.id.clone(),
                    message: format!("{} produces no output to connect from", descriptor.name),
                });
            }
        }

        let order = graph.topological_order(pipeline)?;
        debug!(order = ?order, "resolved execution order");

        for &index in &order {
            let node = &pipeline.nodes[index];
            let descriptor = descriptors[index];
            if !descriptor.is_source() && graph.upstream[index].is_empty() {
                return Err(CompileError::MissingUpstream {
                    node_id: node.id.clone(),
                });
            }
            if self.config.warn_on_dangling
                && !descriptor.is_terminal()
                && graph.consumers[index].is_empty()
            {
                warn!(node = %node.id, "node output is not consumed by any downstream node");
            }
        }

        let configs = pipeline
            .nodes
            .iter()
            .zip(&descriptors)
            .map(|(node, descriptor)| {
                descriptor
                    .resolve(&node.config)
                    .map_err(|e| CompileError::InvalidConfig {
                        node_id: node.id.clone(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CheckedPipeline {
            pipeline,
            descriptors,
            configs,
            graph,
            order,
        })
    }

    fn validate_fields(&self, checked: &CheckedPipeline<'_, '_>) -> Result<(), CompileError> {
        let mut report = ValidationReport::new();
        for (node, descriptor) in checked.pipeline.nodes.iter().zip(&checked.descriptors) {
            report.insert(&node.id, descriptor.schema.validate(&node.config));
        }
        if report.is_empty() {
            Ok(())
        } else {
            warn!(failures = report.len(), "pipeline failed validation");
            Err(CompileError::Validation(report))
        }
    }

    /// Variables indexed by node position; suffixes follow execution order.
    ///
    /// Helper names a generator derives from its variable are reserved
    /// alongside it.
    fn assign_variables(&self, checked: &CheckedPipeline<'_, '_>) -> Vec<String> {
        let nodes = &checked.pipeline.nodes;
        let bases: Vec<String> = checked
            .order
            .iter()
            .map(|&index| {
                let node = &nodes[index];
                sanitize_identifier(node.label.as_deref().unwrap_or(&node.component))
            })
            .collect();
        let helpers: Vec<&[&str]> = checked
            .order
            .iter()
            .map(|&index| checked.configs[index].helper_suffixes())
            .collect();

        let mut variables = vec![String::new(); nodes.len()];
        let names = assign_unique_with_helpers(&bases, &helpers);
        for (&index, name) in checked.order.iter().zip(names) {
            variables[index] = name;
        }
        variables
    }
}
