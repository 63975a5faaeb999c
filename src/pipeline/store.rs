use super::definition::{Pipeline, PipelineNode};
use crate::component::ComponentRegistry;
use crate::error::EditError;
use crate::schema::path::set_path;
use serde_json::Value;
use std::sync::mpsc::Receiver;
use tracing::{debug, warn};

/// A single user edit, as delivered by the form host.
#[derive(Debug, Clone, PartialEq)]
pub enum EditEvent {
    /// Places a new node seeded with its component's default configuration.
    AddNode {
        node_id: String,
        component: String,
        label: Option<String>,
    },
    RemoveNode {
        node_id: String,
    },
    /// Replaces the value at the dotted path `field_id` of one node's configuration.
    SetField {
        node_id: String,
        field_id: String,
        value: Value,
    },
    Relabel {
        node_id: String,
        label: Option<String>,
    },
    Connect {
        source: String,
        target: String,
    },
    Disconnect {
        source: String,
        target: String,
    },
}

/// Single owner of every node's configuration.
///
/// Edits are applied one at a time and each is atomic: a failing edit leaves
/// the pipeline unchanged. The compiler only ever sees [`snapshot`](Self::snapshot)s.
pub struct PipelineStore<'r> {
    registry: &'r ComponentRegistry,
    pipeline: Pipeline,
}

impl<'r> PipelineStore<'r> {
    pub fn new(registry: &'r ComponentRegistry) -> Self {
        Self::from_pipeline(registry, Pipeline::new())
    }

    pub fn from_pipeline(registry: &'r ComponentRegistry, pipeline: Pipeline) -> Self {
        Self { registry, pipeline }
    }

    pub fn apply(&mut self, event: EditEvent) -> Result<(), EditError> {
        debug!(?event, "applying edit");
        match event {
            EditEvent::AddNode {
                node_id,
                component,
                label,
            } => {
                if self.pipeline.node(&node_id).is_some() {
                    return Err(EditError::DuplicateNode(node_id));
                }
                let descriptor = self.registry.get(&component)?;
                let mut node = PipelineNode::new(&node_id, &component, descriptor.default_config());
                node.label = label;
                self.pipeline.nodes.push(node);
            }
            EditEvent::RemoveNode { node_id } => {
                self.pipeline
                    .remove_node(&node_id)
                    .ok_or(EditError::UnknownNode(node_id))?;
            }
            EditEvent::SetField {
                node_id,
                field_id,
                value,
            } => {
                let node = self.node_mut(&node_id)?;
                // Edit a copy so a failed path leaves the stored record untouched.
                let mut config = node.config.clone();
                set_path(&mut config, &field_id, value)?;
                node.config = config;
            }
            EditEvent::Relabel { node_id, label } => {
                self.node_mut(&node_id)?.label = label;
            }
            EditEvent::Connect { source, target } => {
                self.require(&source)?;
                self.require(&target)?;
                self.pipeline.connect(&source, &target);
            }
            EditEvent::Disconnect { source, target } => {
                self.require(&source)?;
                self.require(&target)?;
                self.pipeline.disconnect(&source, &target);
            }
        }
        Ok(())
    }

    /// Applies events from `events` until every sender has been dropped.
    ///
    /// Rejected edits are logged and returned; they do not stop processing.
    pub fn listen(&mut self, events: Receiver<EditEvent>) -> Vec<EditError> {
        let mut rejected = Vec::new();
        for event in events {
            if let Err(e) = self.apply(event) {
                warn!("Rejected edit: {}", e);
                rejected.push(e);
            }
        }
        rejected
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// An immutable copy of the current pipeline for compilation.
    pub fn snapshot(&self) -> Pipeline {
        self.pipeline.clone()
    }

    pub fn config(&self, node_id: &str) -> Option<&Value> {
        self.pipeline.node(node_id).map(|n| &n.config)
    }

    pub fn into_pipeline(self) -> Pipeline {
        self.pipeline
    }

    fn require(&self, node_id: &str) -> Result<(), EditError> {
        self.pipeline
            .node(node_id)
            .map(|_| ())
            .ok_or_else(|| EditError::UnknownNode(node_id.to_string()))
    }

    fn node_mut(&mut self, node_id: &str) -> Result<&mut PipelineNode, EditError> {
        self.pipeline
            .node_mut(node_id)
            .ok_or_else(|| EditError::UnknownNode(node_id.to_string()))
    }
}
