use crate::error::CompileError;
use crate::pipeline::Pipeline;
use ahash::AHashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Index-based view of a pipeline's connections.
///
/// Upstream lists are authoritative; consumers are derived from them.
pub(super) struct Graph {
    /// Upstream node indices per node, primary input first.
    pub(super) upstream: Vec<Vec<usize>>,
    /// Nodes consuming each node's variable.
    pub(super) consumers: Vec<Vec<usize>>,
}

impl Graph {
    pub(super) fn build(pipeline: &Pipeline) -> Result<Self, CompileError> {
        let index: AHashMap<&str, usize> = pipeline
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        let count = pipeline.nodes.len();
        let mut upstream = vec![Vec::new(); count];
        let mut consumers = vec![Vec::new(); count];
        for (target, node) in pipeline.nodes.iter().enumerate() {
            for source_id in &node.upstream {
                let source = *index.get(source_id.as_str()).ok_or_else(|| {
                    CompileError::NodeNotFound {
                        missing_node_id: source_id.clone(),
                        referenced_by: node.id.clone(),
                    }
                })?;
                upstream[target].push(source);
                consumers[source].push(target);
            }
            for target_id in &node.downstream {
                if !index.contains_key(target_id.as_str()) {
                    return Err(CompileError::NodeNotFound {
                        missing_node_id: target_id.clone(),
                        referenced_by: node.id.clone(),
                    });
                }
            }
        }

        Ok(Self {
            upstream,
            consumers,
        })
    }

    /// Kahn's algorithm; among ready nodes the one earliest in document order goes first.
    ///
    /// Fails with `CompileError::Cycle` naming every node that could not be ordered.
    pub(super) fn topological_order(&self, pipeline: &Pipeline) -> Result<Vec<usize>, CompileError> {
        let count = self.upstream.len();
        let mut in_degree: Vec<usize> = self.upstream.iter().map(Vec::len).collect();
        let mut ready: BinaryHeap<Reverse<usize>> = (0..count)
            .filter(|&i| in_degree[i] == 0)
            .map(Reverse)
            .collect();

        let mut order = Vec::with_capacity(count);
        while let Some(Reverse(node)) = ready.pop() {
            order.push(node);
            for &consumer in &self.consumers[node] {
                in_degree[consumer] -= 1;
                if in_degree[consumer] == 0 {
                    ready.push(Reverse(consumer));
                }
            }
        }

        if order.len() < count {
            let nodes = (0..count)
                .filter(|&i| in_degree[i] > 0)
                .map(|i| pipeline.nodes[i].id.clone())
                .collect();
            return Err(CompileError::Cycle { nodes });
        }
        Ok(order)
    }
}
