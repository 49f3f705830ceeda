//! Projection of a hydraulic solution onto per-entity results.

use gn_components::ValveSplit;
use gn_core::{EdgeId, NodeId};
use gn_solver::{HydraulicSolution, Network};
use tracing::warn;

use crate::efficiency::{exergy, ratio_or_zero, transport_efficiency};
use crate::types::{
    CompressorReport, EdgeFlow, FittingReport, JunctionReport, NetworkReport, PipeReport,
    StationReport, SystemReport, UserReport,
};
use crate::{ResultsError, ResultsResult};

/// Build the report for `solution`, which must come from solving `network`.
///
/// Infeasible solutions are projected as they are; NaN pressures propagate
/// into the affected fields.
pub fn project(network: &Network, solution: &HydraulicSolution) -> ResultsResult<NetworkReport> {
    check_shape(network, solution)?;

    let stations = project_stations(network, solution);
    let users = project_users(network, solution);
    let pipes = project_pipes(network, solution);
    let fittings = project_fittings(network, solution);
    let junctions = project_junctions(network, solution);
    let system = summarize(&stations, &users);

    Ok(NetworkReport {
        stations,
        users,
        pipes,
        fittings,
        junctions,
        system,
    })
}

fn check_shape(network: &Network, solution: &HydraulicSolution) -> ResultsResult<()> {
    let topology = network.topology();
    if solution.pressures.len() != topology.node_count() {
        return Err(ResultsError::DimensionMismatch {
            what: "node pressures",
            expected: topology.node_count(),
            actual: solution.pressures.len(),
        });
    }
    if solution.flows.len() != topology.edge_count() {
        return Err(ResultsError::DimensionMismatch {
            what: "edge flows",
            expected: topology.edge_count(),
            actual: solution.flows.len(),
        });
    }
    Ok(())
}

fn project_stations(network: &Network, solution: &HydraulicSolution) -> Vec<StationReport> {
    network
        .sources()
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let station = &source.station;
            let p = solution.station_pressure(network, i);
            let flow = solution.station_outflow(network, i);
            let split = station.split(flow);
            if let ValveSplit::Unsolvable {
                required,
                available,
            } = split
            {
                warn!(
                    station = station.name(),
                    required, available, "not enough compressors for station flow"
                );
            }

            let compressors = split
                .degrees(station.compressor_count)
                .into_iter()
                .enumerate()
                .map(|(index, degree)| {
                    let unit_flow = degree * station.max_flow;
                    CompressorReport {
                        index,
                        degree,
                        flow_m3_min: unit_flow,
                        power_kw: station.power.power(p, unit_flow),
                    }
                })
                .collect();
            let wasted = split.wasted_flow();

            StationReport {
                id: station.name().to_string(),
                p_pa: p,
                flow_m3_min: flow,
                open_count: split.open_count(),
                split_solved: split.is_solvable(),
                wasted_flow_m3_min: wasted,
                gross_power_kw: station.power.power(p, flow + wasted),
                compressors,
            }
        })
        .collect()
}

fn project_users(network: &Network, solution: &HydraulicSolution) -> Vec<UserReport> {
    network
        .sinks()
        .iter()
        .enumerate()
        .map(|(i, sink)| {
            let p = solution.user_pressure(network, i);
            UserReport {
                id: sink.user.name().to_string(),
                p_pa: p,
                flow_m3_min: solution.user_inflow(network, i),
                min_p_pa: sink.user.min_pressure,
                satisfied: sink.user.is_satisfied(p),
            }
        })
        .collect()
}

fn project_pipes(network: &Network, solution: &HydraulicSolution) -> Vec<PipeReport> {
    network
        .topology()
        .edges()
        .iter()
        .map(|edge| {
            let p_a = solution.pressures[edge.from.idx()];
            let p_b = solution.pressures[edge.to.idx()];
            let q = solution.flows[edge.id.idx()];
            PipeReport {
                id: edge.name.clone(),
                p_a_pa: p_a,
                p_b_pa: p_b,
                delta_p_pa: (p_a - p_b).abs(),
                p_mean_pa: 0.5 * (p_a + p_b),
                flow_m3_min: q,
                efficiency: transport_efficiency(q, p_a, p_b),
            }
        })
        .collect()
}

fn project_fittings(network: &Network, solution: &HydraulicSolution) -> Vec<FittingReport> {
    let topology = network.topology();
    let entry = |id: &str, kind: &str, node: NodeId, edge: EdgeId| {
        FittingReport {
            id: id.to_string(),
            kind: kind.to_string(),
            node: topology.nodes()[node.idx()].name.clone(),
            edge: topology.edges()[edge.idx()].name.clone(),
            p_pa: solution.pressures[node.idx()],
            flow_m3_min: solution.flows[edge.idx()],
        }
    };

    let plain = network
        .fittings()
        .iter()
        .map(|f| entry(f.term.name(), f.term.kind(), f.node, f.edge));
    let special = network
        .special_valves()
        .iter()
        .map(|v| entry(v.valve.name(), v.valve.kind.label(), v.node, v.edge));
    plain.chain(special).collect()
}

fn project_junctions(network: &Network, solution: &HydraulicSolution) -> Vec<JunctionReport> {
    let topology = network.topology();
    let a = topology.incidence();
    let hosts_entity = |node: NodeId| {
        network.is_source(node)
            || network.sinks().iter().any(|s| s.node == node)
            || network.fittings().iter().any(|f| f.node == node)
            || network.special_valves().iter().any(|v| v.node == node)
    };

    topology
        .nodes()
        .iter()
        .filter(|node| !hosts_entity(node.id))
        .map(|node| JunctionReport {
            id: node.name.clone(),
            p_pa: solution.pressures[node.id.idx()],
            edges: topology
                .incident_edges(node.id)
                .iter()
                .map(|&e| EdgeFlow {
                    edge: topology.edges()[e.idx()].name.clone(),
                    flow_m3_min: a[(node.id.idx(), e.idx())] * solution.flows[e.idx()],
                })
                .collect(),
        })
        .collect()
}

fn summarize(stations: &[StationReport], users: &[UserReport]) -> SystemReport {
    let delivered: f64 = users.iter().map(|u| exergy(u.flow_m3_min, u.p_pa)).sum();
    let supplied_net: f64 = stations
        .iter()
        .map(|s| exergy(s.flow_m3_min.max(0.0), s.p_pa))
        .sum();
    let supplied_gross: f64 = stations
        .iter()
        .map(|s| exergy((s.flow_m3_min + s.wasted_flow_m3_min).max(0.0), s.p_pa))
        .sum();

    SystemReport {
        net_efficiency: ratio_or_zero(delivered, supplied_net),
        total_efficiency: ratio_or_zero(delivered, supplied_gross),
        total_power_kw: stations.iter().map(|s| s.gross_power_kw).sum(),
        supplied_flow_m3_min: stations.iter().map(|s| s.flow_m3_min).sum(),
        delivered_flow_m3_min: users.iter().map(|u| u.flow_m3_min).sum(),
    }
}
