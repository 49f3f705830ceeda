//! Topology validation logic.

use std::collections::HashMap;

use gn_core::Id;
use nalgebra::DMatrix;

use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, Node};

/// Validate that every edge references two distinct, existing nodes.
pub(crate) fn validate_structure(nodes: &[Node], edges: &[Edge]) -> GraphResult<()> {
    for (i, edge) in edges.iter().enumerate() {
        if edge.id.idx() != i {
            return Err(GraphError::DimensionMismatch {
                what: "edge id",
                expected: i,
                actual: edge.id.idx(),
            });
        }
        for node in [edge.from, edge.to] {
            if node.idx() >= nodes.len() {
                return Err(GraphError::InvalidNodeRef {
                    edge: edge.id,
                    node,
                });
            }
        }
        if edge.from == edge.to {
            return Err(GraphError::SelfLoop {
                edge: edge.id,
                node: edge.from,
            });
        }
    }
    Ok(())
}

/// Build a name → id table, rejecting duplicates.
pub(crate) fn unique_names<'a>(
    items: impl Iterator<Item = (&'a String, Id)>,
    what: &'static str,
) -> GraphResult<HashMap<String, Id>> {
    let mut table = HashMap::new();
    for (name, id) in items {
        if table.insert(name.clone(), id).is_some() {
            return Err(GraphError::DuplicateName {
                what,
                name: name.clone(),
            });
        }
    }
    Ok(table)
}

/// Row indices of the −1 and +1 entries of column `j`.
pub(crate) fn column_endpoints(a: &DMatrix<f64>, j: usize) -> GraphResult<(usize, usize)> {
    let mut from = None;
    let mut to = None;
    for (i, &v) in a.column(j).iter().enumerate() {
        if v == 0.0 {
            continue;
        }
        let slot = if v == -1.0 {
            &mut from
        } else if v == 1.0 {
            &mut to
        } else {
            return Err(GraphError::MalformedColumn { edge: j });
        };
        if slot.replace(i).is_some() {
            return Err(GraphError::MalformedColumn { edge: j });
        }
    }
    match (from, to) {
        (Some(f), Some(t)) => Ok((f, t)),
        _ => Err(GraphError::MalformedColumn { edge: j }),
    }
}
