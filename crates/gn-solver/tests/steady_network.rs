//! Integration tests for the hydraulic solver on small networks.

use gn_components::{
    CompositePipe, CompressorStation, GateValve, SpecialValve, SpecialValveKind, StraightSection,
    User,
};
use gn_core::units::{celsius, kpa, m, m3pmin, mm};
use gn_fluids::{CatalogModel, Fluid, FluidModel};
use gn_graph::TopologyBuilder;
use gn_solver::{Boundary, Network, SolveOutcome, Violation, solve};

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
    let topology = b.build().unwrap();
    let fluid = CatalogModel
        .properties(Fluid::CompressedAir, celsius(20.0))
        .unwrap();
    Network::new(topology, bodies, fluid, celsius(20.0)).unwrap()
}

fn add_station(net: &mut Network, name: &str, edge: &str) {
    let node = net.topology().require_node(name).unwrap();
    let edge = net.topology().require_edge(edge).unwrap();
    let station = CompressorStation::new(name, 3, m3pmin(100.0), 0.7).unwrap();
    net.add_station(node, edge, station).unwrap();
}

fn add_user(net: &mut Network, name: &str, edge: &str, demand: f64, min_kpa: f64) {
    let node = net.topology().require_node(name).unwrap();
    let edge = net.topology().require_edge(edge).unwrap();
    let user = User::new(name, m3pmin(demand), kpa(min_kpa)).unwrap();
    net.add_user(node, edge, user).unwrap();
}

fn single_pipe(min_kpa: f64, demand: f64) -> Network {
    let mut net = network(&["AS-1", "U-1"], &[("P-1", "AS-1", "U-1", 500.0, 150.0)]);
    add_station(&mut net, "AS-1", "P-1");
    add_user(&mut net, "U-1", "P-1", demand, min_kpa);
    net
}

fn two_station_ring() -> Network {
    // P-2 is drawn towards its station on purpose.
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
    add_station(&mut net, "AS-1", "P-1");
    add_station(&mut net, "AS-2", "P-2");
    add_user(&mut net, "U-1", "P-4", 40.0, 500.0);
    add_user(&mut net, "U-2", "P-5", 30.0, 500.0);
    net
}

#[test]
fn single_pipe_delivers_demand() {
    let net = single_pipe(500.0, 60.0);
    let boundary = Boundary::with_default_demands(&net, vec![700_000.0]);
    let sol = solve(&net, &boundary).unwrap();

    assert_eq!(sol.outcome, SolveOutcome::Converged);
    assert!(sol.outcome.is_converged());
    assert!(sol.iterations <= 25);
    assert!(sol.feasible, "{:?}", sol.violations);
    assert!((sol.flows[0] - 60.0).abs() < 1e-6);
    assert_eq!(sol.pressures[0], 700_000.0);
    // ~20 kPa across 500 m of DN150 at 60 m³/min
    let drop = sol.pressures[0] - sol.pressures[1];
    assert!(drop > 15_000.0 && drop < 25_000.0, "drop = {drop}");
}

#[test]
fn single_pipe_drop_matches_resistance() {
    use gn_components::common::{gas_density, reynolds, velocity, volumetric_to_mass};
    use gn_components::{EdgeState, FrictionConfig, ResistanceTerm, friction_factor};

    let net = single_pipe(500.0, 60.0);
    let boundary = Boundary::with_default_demands(&net, vec![700_000.0]);
    let sol = solve(&net, &boundary).unwrap();

    let fluid = net.fluid();
    let mdot = volumetric_to_mass(sol.flows[0], fluid.rho0());
    let mean = 0.5 * (sol.pressures[0] + sol.pressures[1]);
    let density = gas_density(fluid.rho0(), net.temperature(), mean);
    let pipe = &net.pipes()[0];
    let d = pipe.main_diameter();
    let re = reynolds(velocity(mdot, d, density), d, density, fluid.mu());
    let state = EdgeState {
        mass_flow: mdot,
        density,
        reynolds: re,
        friction: friction_factor(d, re, pipe.roughness_mm(), FrictionConfig::default()),
    };
    let expected = pipe.resistance(&state) * mdot * mdot;
    let drop = sol.pressures[0] - sol.pressures[1];
    assert!((drop - expected).abs() / expected < 0.02, "{drop} vs {expected}");
}

#[test]
fn unreachable_minimum_pressure_is_infeasible() {
    let net = single_pipe(800.0, 60.0);
    let boundary = Boundary::with_default_demands(&net, vec![700_000.0]);
    let sol = solve(&net, &boundary).unwrap();

    assert!(!sol.feasible);
    assert!(matches!(
        sol.violations.as_slice(),
        [Violation::UnderPressure { user, .. }] if user == "U-1"
    ));
}

#[test]
fn zero_demand_stops_on_degenerate_flow() {
    let net = single_pipe(500.0, 0.0);
    let boundary = Boundary::with_default_demands(&net, vec![700_000.0]);
    let sol = solve(&net, &boundary).unwrap();

    assert_eq!(sol.outcome, SolveOutcome::DegenerateFlow);
    assert!(!sol.outcome.is_converged());
    assert_eq!(sol.iterations, 0);
    assert_eq!(sol.flows[0], 0.0);
}

#[test]
fn limit_flow_valve_holds_setpoint() {
    let mut net = network(
        &["T-1", "V-1", "T-2", "U-1", "AS-1"],
        &[
            ("P-1", "AS-1", "T-1", 200.0, 150.0),
            ("P-2", "T-1", "V-1", 100.0, 100.0),
            ("P-3", "V-1", "T-2", 100.0, 100.0),
            ("P-4", "T-1", "T-2", 150.0, 100.0),
            ("P-5", "T-2", "U-1", 100.0, 100.0),
        ],
    );
    let v1 = net.topology().require_node("V-1").unwrap();
    let p2 = net.topology().require_edge("P-2").unwrap();
    let valve = SpecialValve::new("V-1", SpecialValveKind::LimitFlow { set_flow: 5.0 }).unwrap();
    net.add_special_valve(v1, p2, valve).unwrap();
    add_station(&mut net, "AS-1", "P-1");
    add_user(&mut net, "U-1", "P-5", 12.0, 500.0);

    let boundary = Boundary::with_default_demands(&net, vec![700_000.0]);
    let sol = solve(&net, &boundary).unwrap();

    assert_eq!(sol.outcome, SolveOutcome::Converged);
    assert!((sol.flows[1] - 5.0).abs() < 0.01, "flow = {}", sol.flows[1]);
    assert!((sol.flows[3] - 7.0).abs() < 0.01);
    assert!(sol.feasible);
}

#[test]
fn limit_pressure_valve_caps_downstream_pressure() {
    let mut net = network(
        &["AS-1", "V-1", "U-1"],
        &[
            ("P-1", "AS-1", "V-1", 100.0, 150.0),
            ("P-2", "V-1", "U-1", 100.0, 150.0),
        ],
    );
    let v1 = net.topology().require_node("V-1").unwrap();
    let p2 = net.topology().require_edge("P-2").unwrap();
    let valve = SpecialValve::new(
        "V-1",
        SpecialValveKind::LimitPressure {
            set_pressure: 600_000.0,
        },
    )
    .unwrap();
    net.add_special_valve(v1, p2, valve).unwrap();
    add_station(&mut net, "AS-1", "P-1");
    add_user(&mut net, "U-1", "P-2", 60.0, 500.0);

    let boundary = Boundary::with_default_demands(&net, vec![700_000.0]);
    let sol = solve(&net, &boundary).unwrap();

    assert_eq!(sol.outcome, SolveOutcome::Converged);
    assert!((sol.pressures[2] - 600_000.0).abs() < 1_000.0);
}

#[test]
fn limit_drop_valve_adds_its_setpoint() {
    let mut net = network(
        &["AS-1", "V-1", "U-1"],
        &[
            ("P-1", "AS-1", "V-1", 100.0, 150.0),
            ("P-2", "V-1", "U-1", 100.0, 150.0),
        ],
    );
    let v1 = net.topology().require_node("V-1").unwrap();
    let p2 = net.topology().require_edge("P-2").unwrap();
    let valve =
        SpecialValve::new("V-1", SpecialValveKind::LimitDrop { set_drop: 50_000.0 }).unwrap();
    net.add_special_valve(v1, p2, valve).unwrap();
    add_station(&mut net, "AS-1", "P-1");
    add_user(&mut net, "U-1", "P-2", 60.0, 500.0);

    let boundary = Boundary::with_default_demands(&net, vec![700_000.0]);
    let sol = solve(&net, &boundary).unwrap();

    let drop = sol.pressures[1] - sol.pressures[2];
    assert!(drop > 50_000.0 && drop < 60_000.0, "drop = {drop}");
}

#[test]
fn flows_balance_at_every_free_node() {
    let net = two_station_ring();
    let boundary = Boundary::with_default_demands(&net, vec![700_000.0, 690_000.0]);
    let sol = solve(&net, &boundary).unwrap();
    assert!(sol.feasible, "{:?}", sol.violations);

    let a = net.topology().incidence();
    for node in net.topology().nodes() {
        if net.is_source(node.id) {
            continue;
        }
        let net_in: f64 = (0..net.topology().edge_count())
            .map(|e| a[(node.id.idx(), e)] * sol.flows[e])
            .sum();
        let withdrawal = net
            .sink_index(&node.name)
            .map_or(0.0, |i| net.sinks()[i].user.demand);
        assert!(
            (net_in - withdrawal).abs() < 1e-6,
            "node {}: {net_in} vs {withdrawal}",
            node.name
        );
    }

    // Station supply covers total demand.
    let supplied: f64 = (0..2).map(|i| sol.station_outflow(&net, i)).sum();
    assert!((supplied - 70.0).abs() < 1e-6);
    let as2 = net.source_index("AS-2").unwrap();
    assert!(sol.station_outflow(&net, as2) > 0.0);
    assert_eq!(net.source_index("U-1"), None);
}

#[test]
fn solving_twice_is_identical() {
    let net = two_station_ring();
    let boundary = Boundary::with_default_demands(&net, vec![700_000.0, 690_000.0]);
    let first = solve(&net, &boundary).unwrap();
    let second = solve(&net, &boundary).unwrap();
    assert_eq!(first, second);
}

#[test]
fn weak_station_receiving_gas_is_infeasible() {
    let net = two_station_ring();
    let boundary = Boundary::with_default_demands(&net, vec![600_000.0, 700_000.0]);
    let sol = solve(&net, &boundary).unwrap();

    assert!(!sol.feasible);
    assert!(sol.violations.iter().any(
        |v| matches!(v, Violation::ReversedSource { station, .. } if station == "AS-1")
    ));
    let as1 = net.source_index("AS-1").unwrap();
    assert!(sol.station_outflow(&net, as1) < 0.0);
}

#[test]
fn boundary_shape_mismatch_is_an_error() {
    let net = single_pipe(500.0, 60.0);
    let boundary = Boundary::new(vec![700_000.0, 650_000.0], vec![60.0]);
    assert!(solve(&net, &boundary).is_err());
}
