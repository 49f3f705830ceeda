//! Projection of solved networks onto engineering results.

use gn_components::{CompositePipe, CompressorStation, GateValve, StraightSection, User};
use gn_core::units::{celsius, kpa, m, m3pmin, mm};
use gn_fluids::{CatalogModel, Fluid, FluidModel};
use gn_graph::TopologyBuilder;
use gn_results::{ResultsError, project};
use gn_solver::{Boundary, HydraulicSolution, Network, SolveOutcome, solve};
use proptest::prelude::*;

/// (name, from, to, length m, diameter mm)
type PipeSpec<'a> = (&'a str, &'a str, &'a str, f64, f64);

fn network(nodes: &[&str], pipes: &[PipeSpec<'_>]) -> Network {
    let mut b = TopologyBuilder::new();
    for n in nodes {
        b.add_node(*n).unwrap();
    }
    let mut bodies = Vec::new();
    for &(name, from, to, len, d) in pipes {
        let f = b.node_id(from).unwrap();
        let t = b.node_id(to).unwrap();
        b.add_edge(name, f, t).unwrap();
        bodies.push(
            CompositePipe::new(name, vec![StraightSection::new(m(len), mm(d), mm(0.1))], vec![])
                .unwrap(),
        );
    }
    let fluid = CatalogModel
        .properties(Fluid::CompressedAir, celsius(20.0))
        .unwrap();
    Network::new(b.build().unwrap(), bodies, fluid, celsius(20.0)).unwrap()
}

fn attach_station(net: &mut Network, name: &str, edge: &str) {
    let node = net.topology().require_node(name).unwrap();
    let edge = net.topology().require_edge(edge).unwrap();
    let station = CompressorStation::new(name, 3, m3pmin(100.0), 0.7).unwrap();
    net.add_station(node, edge, station).unwrap();
}

fn attach_user(net: &mut Network, name: &str, edge: &str, demand: f64) {
    let node = net.topology().require_node(name).unwrap();
    let edge = net.topology().require_edge(edge).unwrap();
    let user = User::new(name, m3pmin(demand), kpa(500.0)).unwrap();
    net.add_user(node, edge, user).unwrap();
}

fn single_pipe(demand: f64, diameter_mm: f64) -> Network {
    let mut net = network(
        &["AS-1", "U-1"],
        &[("P-1", "AS-1", "U-1", 500.0, diameter_mm)],
    );
    attach_station(&mut net, "AS-1", "P-1");
    attach_user(&mut net, "U-1", "P-1", demand);
    net
}

fn ring() -> Network {
    let mut net = network(
        &["T-1", "T-2", "U-1", "U-2", "AS-1", "AS-2"],
        &[
            ("P-1", "AS-1", "T-1", 300.0, 150.0),
            ("P-2", "T-2", "AS-2", 300.0, 150.0),
            ("P-3", "T-1", "T-2", 400.0, 100.0),
            ("P-4", "T-1", "U-1", 200.0, 100.0),
            ("P-5", "T-2", "U-2", 200.0, 100.0),
        ],
    );
    let t2 = net.topology().require_node("T-2").unwrap();
    let p2 = net.topology().require_edge("P-2").unwrap();
    net.add_fitting(t2, p2, Box::new(GateValve::new("V-1", mm(150.0)).unwrap()))
        .unwrap();
    attach_station(&mut net, "AS-1", "P-1");
    attach_station(&mut net, "AS-2", "P-2");
    attach_user(&mut net, "U-1", "P-4", 40.0);
    attach_user(&mut net, "U-2", "P-5", 30.0);
    net
}

#[test]
fn single_pipe_station_split_and_power() {
    let net = single_pipe(60.0, 150.0);
    let sol = solve(&net, &Boundary::with_default_demands(&net, vec![700_000.0])).unwrap();
    assert!(sol.feasible);
    let report = project(&net, &sol).unwrap();

    let station = report.station("AS-1").unwrap();
    assert!((station.flow_m3_min - 60.0).abs() < 1e-6);
    assert_eq!(station.open_count, 1);
    assert!(station.split_solved);
    // One unit held at its minimum degree of 0.7 delivers 70 for a demand of 60.
    assert!((station.compressors[0].degree - 0.7).abs() < 1e-12);
    assert_eq!(station.compressors[1].degree, 0.0);
    assert!((station.wasted_flow_m3_min - 10.0).abs() < 1e-6);
    let expected = 51.7 * 7.0 + 5.5833 * 70.0 - 312.37;
    assert!((station.gross_power_kw - expected).abs() < 1e-6);
    assert_eq!(station.compressors[1].power_kw, 0.0);
    assert!((report.system.total_power_kw - expected).abs() < 1e-6);

    let user = report.user("U-1").unwrap();
    assert!(user.satisfied);
    assert!((user.flow_m3_min - 60.0).abs() < 1e-6);

    let pipe = report.pipe("P-1").unwrap();
    assert_eq!(pipe.p_a_pa, 700_000.0);
    assert!((pipe.delta_p_pa - (pipe.p_a_pa - pipe.p_b_pa)).abs() < 1e-9);
    assert!(pipe.efficiency > 0.9 && pipe.efficiency < 1.0);

    // Wasted flow lowers the gross figure.
    assert!(report.system.total_efficiency < report.system.net_efficiency);
    assert!(report.system.net_efficiency <= 1.0);
}

#[test]
fn ring_reports_fittings_and_junctions() {
    let net = ring();
    let boundary = Boundary::with_default_demands(&net, vec![700_000.0, 690_000.0]);
    let sol = solve(&net, &boundary).unwrap();
    assert!(sol.feasible, "{:?}", sol.violations);
    let report = project(&net, &sol).unwrap();

    assert_eq!(report.fittings.len(), 1);
    let valve = &report.fittings[0];
    assert_eq!(valve.id, "V-1");
    assert_eq!(valve.kind, "valve");
    assert_eq!(valve.node, "T-2");
    assert_eq!(valve.edge, "P-2");

    // T-2 hosts the valve, so only T-1 is a bare junction.
    assert_eq!(report.junctions.len(), 1);
    let t1 = &report.junctions[0];
    assert_eq!(t1.id, "T-1");
    assert_eq!(t1.edges.len(), 3);
    let net_inflow: f64 = t1.edges.iter().map(|e| e.flow_m3_min).sum();
    assert!(net_inflow.abs() < 1e-3, "imbalance {net_inflow}");

    let supplied = report.system.supplied_flow_m3_min;
    let delivered = report.system.delivered_flow_m3_min;
    assert!((supplied - 70.0).abs() < 1e-3);
    assert!((delivered - 70.0).abs() < 1e-3);
}

#[test]
fn station_without_enough_units_reports_unsolved_split() {
    let net = single_pipe(320.0, 400.0);
    let sol = solve(&net, &Boundary::with_default_demands(&net, vec![700_000.0])).unwrap();
    let report = project(&net, &sol).unwrap();
    let station = report.station("AS-1").unwrap();
    assert!(!station.split_solved);
    assert_eq!(station.open_count, 0);
    assert!(station.compressors.iter().all(|c| c.degree == 0.0));
    assert_eq!(station.wasted_flow_m3_min, 0.0);
}

#[test]
fn mismatched_solution_is_rejected() {
    let net = single_pipe(60.0, 150.0);
    let sol = HydraulicSolution {
        pressures: vec![700_000.0],
        flows: vec![60.0],
        base_pressure: 700_000.0,
        iterations: 0,
        outcome: SolveOutcome::Converged,
        feasible: true,
        violations: Vec::new(),
    };
    assert!(matches!(
        project(&net, &sol),
        Err(ResultsError::DimensionMismatch {
            what: "node pressures",
            expected: 2,
            actual: 1
        })
    ));
}

#[test]
fn report_serializes_with_unit_suffixed_fields() {
    let net = single_pipe(60.0, 150.0);
    let sol = solve(&net, &Boundary::with_default_demands(&net, vec![700_000.0])).unwrap();
    let json = project(&net, &sol).unwrap().to_json_pretty().unwrap();
    assert!(json.contains("\"gross_power_kw\""));
    assert!(json.contains("\"p_a_pa\""));
    assert!(json.contains("\"total_efficiency\""));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn efficiencies_stay_in_unit_interval(
        demand in 10.0f64..90.0,
        p_kpa in 600.0f64..800.0,
    ) {
        let net = single_pipe(demand, 150.0);
        let sol = solve(&net, &Boundary::with_default_demands(&net, vec![p_kpa * 1000.0])).unwrap();
        prop_assume!(sol.feasible);
        let report = project(&net, &sol).unwrap();
        for pipe in &report.pipes {
            prop_assert!((0.0..=1.0).contains(&pipe.efficiency));
        }
        prop_assert!((0.0..=1.0).contains(&report.system.net_efficiency));
        prop_assert!((0.0..=1.0).contains(&report.system.total_efficiency));
    }
}
