//! Core topology data structures.

use std::collections::HashMap;

use gn_core::{EdgeId, NodeId};
use nalgebra::DMatrix;

use crate::error::{GraphError, GraphResult};
use crate::validate;

/// A point in the network where a pressure value is defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
}

/// A composite pipe connecting two nodes.
///
/// `from` carries the −1 entry of the incidence column and `to` the +1 entry:
/// positive flow runs `from → to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub name: String,
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    /// Incidence sign of this edge at `node`: +1 at `to`, −1 at `from`, 0 otherwise.
    pub fn sign_at(&self, node: NodeId) -> f64 {
        if node == self.to {
            1.0
        } else if node == self.from {
            -1.0
        } else {
            0.0
        }
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.from {
            Some(self.to)
        } else if node == self.to {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Validated, immutable network topology.
///
/// Holds the node and edge lists, the signed node×edge incidence matrix,
/// name lookups and a compact node→edge adjacency.
#[derive(Debug, Clone)]
pub struct Topology {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) incidence: DMatrix<f64>,
    pub(crate) node_names: HashMap<String, NodeId>,
    pub(crate) edge_names: HashMap<String, EdgeId>,

    /// Node i's edges are in node_edges[node_edge_offsets[i]..node_edge_offsets[i+1]].
    pub(crate) node_edge_offsets: Vec<usize>,
    pub(crate) node_edges: Vec<EdgeId>,
}

impl Topology {
    /// Build a topology from a caller-supplied incidence matrix.
    ///
    /// Rows are nodes, columns are edges; each column must hold exactly one
    /// +1 and one −1 and nothing else.
    pub fn from_incidence(
        node_names: Vec<String>,
        edge_names: Vec<String>,
        incidence: DMatrix<f64>,
    ) -> GraphResult<Self> {
        if incidence.nrows() != node_names.len() {
            return Err(GraphError::DimensionMismatch {
                what: "incidence rows",
                expected: node_names.len(),
                actual: incidence.nrows(),
            });
        }
        if incidence.ncols() != edge_names.len() {
            return Err(GraphError::DimensionMismatch {
                what: "incidence columns",
                expected: edge_names.len(),
                actual: incidence.ncols(),
            });
        }

        let nodes: Vec<Node> = node_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Node {
                id: NodeId::from_index(i as u32),
                name,
            })
            .collect();

        let mut edges = Vec::with_capacity(edge_names.len());
        for (j, name) in edge_names.into_iter().enumerate() {
            let (from, to) = validate::column_endpoints(&incidence, j)?;
            edges.push(Edge {
                id: EdgeId::from_index(j as u32),
                name,
                from: NodeId::from_index(from as u32),
                to: NodeId::from_index(to as u32),
            });
        }

        Self::assemble(nodes, edges)
    }

    /// Validate node/edge lists and derive incidence, lookups and adjacency.
    pub(crate) fn assemble(nodes: Vec<Node>, edges: Vec<Edge>) -> GraphResult<Self> {
        validate::validate_structure(&nodes, &edges)?;
        let node_names = validate::unique_names(nodes.iter().map(|n| (&n.name, n.id)), "node")?;
        let edge_names = validate::unique_names(edges.iter().map(|e| (&e.name, e.id)), "edge")?;

        let mut incidence = DMatrix::zeros(nodes.len(), edges.len());
        for edge in &edges {
            incidence[(edge.from.idx(), edge.id.idx())] = -1.0;
            incidence[(edge.to.idx(), edge.id.idx())] = 1.0;
        }

        let (node_edge_offsets, node_edges) = build_adjacency(&nodes, &edges);

        Ok(Self {
            nodes,
            edges,
            incidence,
            node_names,
            edge_names,
            node_edge_offsets,
            node_edges,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.idx())
    }

    /// Signed node×edge incidence matrix.
    pub fn incidence(&self) -> &DMatrix<f64> {
        &self.incidence
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.node_names.get(name).copied()
    }

    pub fn edge_id(&self, name: &str) -> Option<EdgeId> {
        self.edge_names.get(name).copied()
    }

    /// Look up a node by name, failing with `NameNotFound`.
    pub fn require_node(&self, name: &str) -> GraphResult<NodeId> {
        self.node_id(name).ok_or_else(|| GraphError::NameNotFound {
            what: "Node",
            name: name.to_string(),
        })
    }

    /// Look up an edge by name, failing with `NameNotFound`.
    pub fn require_edge(&self, name: &str) -> GraphResult<EdgeId> {
        self.edge_id(name).ok_or_else(|| GraphError::NameNotFound {
            what: "Edge",
            name: name.to_string(),
        })
    }

    /// Edges incident to a node, sorted by edge index.
    pub fn incident_edges(&self, node: NodeId) -> &[EdgeId] {
        let idx = node.idx();
        if idx >= self.nodes.len() {
            return &[];
        }
        let start = self.node_edge_offsets[idx];
        let end = self.node_edge_offsets[idx + 1];
        &self.node_edges[start..end]
    }

    /// Endpoint pair `(from, to)` of an edge.
    pub fn endpoints(&self, edge: EdgeId) -> Option<(NodeId, NodeId)> {
        self.edge(edge).map(|e| (e.from, e.to))
    }
}

fn build_adjacency(nodes: &[Node], edges: &[Edge]) -> (Vec<usize>, Vec<EdgeId>) {
    let mut per_node: Vec<Vec<EdgeId>> = vec![Vec::new(); nodes.len()];
    for edge in edges {
        per_node[edge.from.idx()].push(edge.id);
        per_node[edge.to.idx()].push(edge.id);
    }

    let mut offsets = Vec::with_capacity(nodes.len() + 1);
    let mut flat = Vec::with_capacity(edges.len() * 2);
    offsets.push(0);
    for mut list in per_node {
        list.sort_by_key(|e| e.index());
        flat.extend_from_slice(&list);
        offsets.push(flat.len());
    }
    (offsets, flat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gn_core::Id;

    #[test]
    fn edge_sign_and_other() {
        let edge = Edge {
            id: Id::from_index(0),
            name: "P-1".into(),
            from: Id::from_index(3),
            to: Id::from_index(1),
        };
        assert_eq!(edge.sign_at(Id::from_index(1)), 1.0);
        assert_eq!(edge.sign_at(Id::from_index(3)), -1.0);
        assert_eq!(edge.sign_at(Id::from_index(2)), 0.0);
        assert_eq!(edge.other(Id::from_index(3)), Some(Id::from_index(1)));
        assert_eq!(edge.other(Id::from_index(2)), None);
    }

    #[test]
    fn from_incidence_derives_endpoints() {
        // n0 -> n1 -> n2
        let a = DMatrix::from_row_slice(3, 2, &[-1.0, 0.0, 1.0, -1.0, 0.0, 1.0]);
        let topo = Topology::from_incidence(
            vec!["n0".into(), "n1".into(), "n2".into()],
            vec!["e0".into(), "e1".into()],
            a,
        )
        .unwrap();
        assert_eq!(
            topo.endpoints(Id::from_index(1)),
            Some((Id::from_index(1), Id::from_index(2)))
        );
        assert_eq!(topo.incident_edges(Id::from_index(1)).len(), 2);
        assert_eq!(topo.edge_id("e1"), Some(Id::from_index(1)));
    }

    #[test]
    fn from_incidence_rejects_shape_mismatch() {
        let a = DMatrix::zeros(2, 1);
        let err = Topology::from_incidence(
            vec!["n0".into(), "n1".into(), "n2".into()],
            vec!["e0".into()],
            a,
        )
        .unwrap_err();
        assert!(matches!(err, GraphError::DimensionMismatch { .. }));
    }
}
