//! Incremental topology builder.

use gn_core::{EdgeId, NodeId};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, Node, Topology};

/// Builder for constructing a topology incrementally.
///
/// Use `add_node` and `add_edge` to build up the network,
/// then call `build()` to validate and freeze it into an immutable `Topology`.
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl TopologyBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named node and return its ID.
    pub fn add_node(&mut self, name: impl Into<String>) -> GraphResult<NodeId> {
        let name = name.into();
        if self.nodes.iter().any(|n| n.name == name) {
            return Err(GraphError::DuplicateName { what: "node", name });
        }
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.nodes.push(Node { id, name });
        Ok(id)
    }

    /// Add a named edge oriented `from → to` and return its ID.
    pub fn add_edge(
        &mut self,
        name: impl Into<String>,
        from: NodeId,
        to: NodeId,
    ) -> GraphResult<EdgeId> {
        let name = name.into();
        if self.edges.iter().any(|e| e.name == name) {
            return Err(GraphError::DuplicateName { what: "edge", name });
        }
        let id = EdgeId::from_index(self.edges.len() as u32);
        self.edges.push(Edge { id, name, from, to });
        Ok(id)
    }

    /// Look up a node added so far.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    /// Build and validate the topology.
    pub fn build(self) -> GraphResult<Topology> {
        Topology::assemble(self.nodes, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_basic() {
        let mut builder = TopologyBuilder::new();
        let n1 = builder.add_node("Node1").unwrap();
        let n2 = builder.add_node("Node2").unwrap();
        let e1 = builder.add_edge("Edge1", n1, n2).unwrap();

        assert_eq!(n1.index(), 0);
        assert_eq!(n2.index(), 1);
        assert_eq!(e1.index(), 0);
        assert_eq!(builder.node_id("Node2"), Some(n2));
    }

    #[test]
    fn builder_rejects_duplicate_node() {
        let mut builder = TopologyBuilder::new();
        builder.add_node("T-1").unwrap();
        assert!(builder.add_node("T-1").is_err());
    }

    #[test]
    fn builder_rejects_self_loop() {
        let mut builder = TopologyBuilder::new();
        let n1 = builder.add_node("N1").unwrap();
        builder.add_edge("E1", n1, n1).unwrap();
        assert!(matches!(builder.build(), Err(GraphError::SelfLoop { .. })));
    }

    #[test]
    fn builder_build_simple() {
        let mut builder = TopologyBuilder::new();
        let n1 = builder.add_node("N1").unwrap();
        let n2 = builder.add_node("N2").unwrap();
        builder.add_edge("E1", n1, n2).unwrap();

        let topo = builder.build().unwrap();
        assert_eq!(topo.node_count(), 2);
        assert_eq!(topo.edge_count(), 1);
        assert_eq!(topo.incidence()[(0, 0)], -1.0);
        assert_eq!(topo.incidence()[(1, 0)], 1.0);
        assert_eq!(topo.incident_edges(n1).len(), 1);
    }
}
