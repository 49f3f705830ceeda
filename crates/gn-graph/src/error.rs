//! Topology-specific error types.

use gn_core::{EdgeId, GnError, NodeId};

pub type GraphResult<T> = Result<T, GraphError>;

/// Topology construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge refers to a node that doesn't exist.
    InvalidNodeRef { edge: EdgeId, node: NodeId },

    /// An edge connects a node to itself.
    SelfLoop { edge: EdgeId, node: NodeId },

    /// Two nodes or two edges share a name.
    DuplicateName { what: &'static str, name: String },

    /// Incidence matrix shape disagrees with the declared node/edge counts.
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An incidence column does not hold exactly one +1 and one -1.
    MalformedColumn { edge: usize },

    /// Name not found in the lookup tables.
    NameNotFound { what: &'static str, name: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::InvalidNodeRef { edge, node } => {
                write!(f, "Edge {} refers to non-existent node {}", edge, node)
            }
            GraphError::SelfLoop { edge, node } => {
                write!(f, "Edge {} starts and ends at node {}", edge, node)
            }
            GraphError::DuplicateName { what, name } => {
                write!(f, "Duplicate {} name '{}'", what, name)
            }
            GraphError::DimensionMismatch {
                what,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Dimension mismatch for {}: expected {}, got {}",
                    what, expected, actual
                )
            }
            GraphError::MalformedColumn { edge } => {
                write!(
                    f,
                    "Incidence column {} must hold exactly one +1 and one -1",
                    edge
                )
            }
            GraphError::NameNotFound { what, name } => {
                write!(f, "{} '{}' not found", what, name)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for GnError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::DimensionMismatch {
                what,
                expected,
                actual,
            } => GnError::DimensionMismatch {
                what,
                expected,
                actual,
            },
            GraphError::NameNotFound { what, .. } => GnError::InvalidArg { what },
            _ => GnError::Invariant {
                what: "topology structure",
            },
        }
    }
}
