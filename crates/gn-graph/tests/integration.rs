//! Integration tests for topology construction.

use gn_graph::{GraphError, Topology, TopologyBuilder};
use nalgebra::DMatrix;

fn ring() -> Topology {
    // S -> A, A -> B, A -> C, B -> D, C -> D
    let mut b = TopologyBuilder::new();
    let a = b.add_node("A").unwrap();
    let bb = b.add_node("B").unwrap();
    let c = b.add_node("C").unwrap();
    let d = b.add_node("D").unwrap();
    let s = b.add_node("S").unwrap();
    b.add_edge("P-AB", a, bb).unwrap();
    b.add_edge("P-AC", a, c).unwrap();
    b.add_edge("P-BD", bb, d).unwrap();
    b.add_edge("P-CD", c, d).unwrap();
    b.add_edge("P-SA", s, a).unwrap();
    b.build().unwrap()
}

#[test]
fn every_column_has_one_plus_and_one_minus() {
    let topo = ring();
    let a = topo.incidence();
    for j in 0..topo.edge_count() {
        let col = a.column(j);
        assert_eq!(col.iter().filter(|&&v| v == 1.0).count(), 1);
        assert_eq!(col.iter().filter(|&&v| v == -1.0).count(), 1);
        assert!((col.sum()).abs() < 1e-12);
    }
}

#[test]
fn from_end_is_negative_and_to_end_positive() {
    let topo = ring();
    let a = topo.incidence();
    for edge in topo.edges() {
        assert_eq!(a[(edge.from.idx(), edge.id.idx())], -1.0);
        assert_eq!(a[(edge.to.idx(), edge.id.idx())], 1.0);
    }
    let sa = topo.require_edge("P-SA").unwrap();
    let s = topo.require_node("S").unwrap();
    assert_eq!(a[(s.idx(), sa.idx())], -1.0);
}

#[test]
fn incidence_round_trips_through_from_incidence() {
    let topo = ring();
    let names: Vec<String> = topo.nodes().iter().map(|n| n.name.clone()).collect();
    let edges: Vec<String> = topo.edges().iter().map(|e| e.name.clone()).collect();
    let rebuilt = Topology::from_incidence(names, edges, topo.incidence().clone()).unwrap();
    assert_eq!(rebuilt.edges(), topo.edges());
    assert_eq!(rebuilt.incidence(), topo.incidence());
}

#[test]
fn adjacency_lists_every_incident_edge() {
    let topo = ring();
    let a = topo.require_node("A").unwrap();
    let names: Vec<&str> = topo
        .incident_edges(a)
        .iter()
        .map(|&e| topo.edge(e).unwrap().name.as_str())
        .collect();
    assert_eq!(names, vec!["P-AB", "P-AC", "P-SA"]);
}

#[test]
fn missing_names_are_reported() {
    let topo = ring();
    assert!(matches!(
        topo.require_edge("P-XX"),
        Err(GraphError::NameNotFound { .. })
    ));
}

#[test]
fn zero_column_is_malformed() {
    let a = DMatrix::from_row_slice(2, 1, &[0.0, 0.0]);
    let err = Topology::from_incidence(vec!["a".into(), "b".into()], vec!["e".into()], a)
        .unwrap_err();
    assert_eq!(err, GraphError::MalformedColumn { edge: 0 });
}
