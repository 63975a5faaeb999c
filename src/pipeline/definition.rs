use serde_json::Value;

/// The canonical, already-validated graph handed to the compiler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    /// Nodes in document order. Ties in the topological order are broken by this order.
    pub nodes: Vec<PipelineNode>,
}

/// One placed instance of a component.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineNode {
    pub id: String,
    /// Id of the component descriptor this node instantiates.
    pub component: String,
    pub label: Option<String>,
    /// The node's own configuration record.
    pub config: Value,
    /// Nodes feeding this one, primary input first.
    pub upstream: Vec<String>,
    pub downstream: Vec<String>,
}

impl PipelineNode {
    pub fn new(id: &str, component: &str, config: Value) -> Self {
        Self {
            id: id.to_string(),
            component: component.to_string(),
            label: None,
            config,
            upstream: Vec::new(),
            downstream: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// The upstream node whose variable becomes this node's input.
    pub fn primary_upstream(&self) -> Option<&str> {
        self.upstream.first().map(String::as_str)
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: PipelineNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Adds a `source -> target` connection, returning it for chaining.
    ///
    /// Unknown ids and duplicate connections are ignored here; the compiler
    /// reports structural problems.
    pub fn with_edge(mut self, source: &str, target: &str) -> Self {
        self.connect(source, target);
        self
    }

    pub fn node(&self, id: &str) -> Option<&PipelineNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut PipelineNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    /// Connects `source` to `target`. Returns `false` if either node is
    /// missing or the connection already exists.
    pub fn connect(&mut self, source: &str, target: &str) -> bool {
        if self.node(source).is_none() || self.node(target).is_none() {
            return false;
        }
        let exists = self
            .node(target)
            .is_some_and(|n| n.upstream.iter().any(|u| u == source));
        if exists {
            return false;
        }
        if let Some(node) = self.node_mut(source) {
            node.downstream.push(target.to_string());
        }
        if let Some(node) = self.node_mut(target) {
            node.upstream.push(source.to_string());
        }
        true
    }

    /// Removes the `source -> target` connection. Returns whether it existed.
    pub fn disconnect(&mut self, source: &str, target: &str) -> bool {
        let mut removed = false;
        if let Some(node) = self.node_mut(source) {
            let before = node.downstream.len();
            node.downstream.retain(|d| d != target);
            removed |= node.downstream.len() != before;
        }
        if let Some(node) = self.node_mut(target) {
            let before = node.upstream.len();
            node.upstream.retain(|u| u != source);
            removed |= node.upstream.len() != before;
        }
        removed
    }

    /// Removes a node together with every connection touching it.
    pub fn remove_node(&mut self, id: &str) -> Option<PipelineNode> {
        let index = self.position(id)?;
        let removed = self.nodes.remove(index);
        for node in &mut self.nodes {
            node.upstream.retain(|u| u != id);
            node.downstream.retain(|d| d != id);
        }
        Some(removed)
    }

    /// Every connection as `(source, target)`, in source document order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes.iter().flat_map(|node| {
            node.downstream
                .iter()
                .map(move |target| (node.id.as_str(), target.as_str()))
        })
    }
}
