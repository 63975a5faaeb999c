use super::definition::{Pipeline, PipelineNode};
use super::document::{DocumentEdge, DocumentNode, DocumentNodeData, PipelineDocument};
use crate::component::ComponentRegistry;
use crate::error::PipelineError;
use ahash::{AHashMap, AHashSet};

/// A trait for persisted or custom formats that can be loaded into a canonical [`Pipeline`].
///
/// Loading checks that node ids are unique, that every node references a
/// registered component, and that every connection points at existing nodes.
/// Graph shape (cycles, missing inputs) is left to the compiler.
///
/// # Example
///
/// ```rust,no_run
/// use pipeforge::prelude::*;
///
/// struct Step { id: String, kind: String }
/// struct MyFormat { steps: Vec<Step> }
///
/// impl IntoPipeline for MyFormat {
///     fn into_pipeline(
///         self,
///         registry: &ComponentRegistry,
///     ) -> std::result::Result<Pipeline, PipelineError> {
///         let mut pipeline = Pipeline::new();
///         for step in self.steps {
///             let descriptor = registry.get(&step.kind).map_err(|_| {
///                 PipelineError::UnknownDescriptor { node_id: step.id.clone(), component: step.kind.clone() }
///             })?;
///             pipeline.nodes.push(PipelineNode::new(&step.id, &step.kind, descriptor.default_config()));
///         }
///         Ok(pipeline)
///     }
/// }
/// ```
pub trait IntoPipeline {
    /// Consumes the object and converts it into a pipeline over `registry`'s components.
    fn into_pipeline(self, registry: &ComponentRegistry) -> Result<Pipeline, PipelineError>;
}

impl IntoPipeline for PipelineDocument {
    fn into_pipeline(self, registry: &ComponentRegistry) -> Result<Pipeline, PipelineError> {
        let mut seen = AHashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(PipelineError::DuplicateNodeId(node.id.clone()));
            }
            if !registry.contains(&node.component) {
                return Err(PipelineError::UnknownDescriptor {
                    node_id: node.id.clone(),
                    component: node.component.clone(),
                });
            }
        }

        for edge in &self.edges {
            for (endpoint, other) in [(&edge.source, &edge.target), (&edge.target, &edge.source)] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(PipelineError::NodeNotFound {
                        missing_node_id: endpoint.clone(),
                        referenced_by: other.clone(),
                    });
                }
            }
        }

        // Inputs are ordered by target handle so that `input-0` is the primary input.
        let mut incoming: AHashMap<&str, Vec<&DocumentEdge>> = AHashMap::new();
        let mut outgoing: AHashMap<&str, Vec<&str>> = AHashMap::new();
        for edge in &self.edges {
            incoming.entry(edge.target.as_str()).or_default().push(edge);
            let targets = outgoing.entry(edge.source.as_str()).or_default();
            if !targets.contains(&edge.target.as_str()) {
                targets.push(edge.target.as_str());
            }
        }
        for edges in incoming.values_mut() {
            edges.sort_by_key(|e| e.target_index());
        }

        let nodes = self
            .nodes
            .iter()
            .map(|node| {
                let mut upstream: Vec<String> = Vec::new();
                for edge in incoming.get(node.id.as_str()).into_iter().flatten() {
                    if !upstream.contains(&edge.source) {
                        upstream.push(edge.source.clone());
                    }
                }
                let downstream = outgoing
                    .get(node.id.as_str())
                    .map(|targets| targets.iter().map(|t| t.to_string()).collect())
                    .unwrap_or_default();
                PipelineNode {
                    id: node.id.clone(),
                    component: node.component.clone(),
                    label: node.data.label.clone(),
                    config: node.data.config.clone(),
                    upstream,
                    downstream,
                }
            })
            .collect();

        Ok(Pipeline { nodes })
    }
}

impl Pipeline {
    /// Parses a persisted pipeline and loads it against `registry`.
    pub fn from_json(json: &str, registry: &ComponentRegistry) -> Result<Self, PipelineError> {
        let document: PipelineDocument =
            serde_json::from_str(json).map_err(|e| PipelineError::JsonParse(e.to_string()))?;
        document.into_pipeline(registry)
    }

    /// Converts back to the persisted form. Handles are numbered by input position.
    pub fn to_document(&self) -> PipelineDocument {
        let nodes = self
            .nodes
            .iter()
            .map(|node| DocumentNode {
                id: node.id.clone(),
                component: node.component.clone(),
                data: DocumentNodeData {
                    label: node.label.clone(),
                    config: node.config.clone(),
                },
            })
            .collect();

        let edges = self
            .nodes
            .iter()
            .flat_map(|target| {
                target
                    .upstream
                    .iter()
                    .enumerate()
                    .map(move |(index, source)| DocumentEdge {
                        source: source.clone(),
                        target: target.id.clone(),
                        source_handle: None,
                        target_handle: Some(format!("input-{}", index)),
                    })
            })
            .collect();

        PipelineDocument { nodes, edges }
    }

    pub fn to_json(&self) -> Result<String, PipelineError> {
        serde_json::to_string_pretty(&self.to_document())
            .map_err(|e| PipelineError::Serialize(e.to_string()))
    }
}
