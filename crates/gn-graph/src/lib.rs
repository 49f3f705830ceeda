//! gn-graph: topology layer for gas distribution networks.
//!
//! Provides:
//! - Core topology data structures (Node, Edge, Topology)
//! - Incremental builder with validation
//! - Construction from a caller-supplied signed incidence matrix
//! - Name ↔ index lookups for solver integration
//!
//! # Example
//!
//! ```
//! use gn_graph::TopologyBuilder;
//!
//! let mut builder = TopologyBuilder::new();
//! let tee = builder.add_node("T-1").unwrap();
//! let station = builder.add_node("AS-1").unwrap();
//! builder.add_edge("P-1", station, tee).unwrap();
//! let topology = builder.build().unwrap();
//!
//! assert_eq!(topology.node_count(), 2);
//! assert_eq!(topology.edge_count(), 1);
//! assert_eq!(topology.incidence()[(0, 0)], 1.0);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::TopologyBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, Node, Topology};
