//! Compilation of a network document into solver inputs.

use gn_components::{
    BendSection, CompositePipe, CompressorStation, GateValve, PowerModel, Reducer, SpecialValve,
    SpecialValveKind, StraightSection, User,
};
use gn_core::units::{celsius, kpa, m, m3pmin, mm};
use gn_core::{EdgeId, NodeId};
use gn_fluids::{CatalogModel, Fluid, FluidModel, FluidProperties};
use gn_graph::{Topology, TopologyBuilder};
use gn_project::{NetworkDoc, PipeDef, validate_network};
use gn_solver::{Boundary, Network};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Solver-ready form of one document.
#[derive(Debug)]
pub struct CompiledNetwork {
    pub name: String,
    pub network: Network,
    /// Station pressures and demands as written in the document.
    pub boundary: Boundary,
    pub fluid: FluidProperties,
}

/// Validate `doc` and build its network and boundary.
pub fn compile_network(doc: &NetworkDoc) -> AppResult<CompiledNetwork> {
    validate_network(doc)?;

    let fluid_kind = Fluid::from_code(doc.fluid.code)?;
    let temperature = celsius(doc.fluid.temperature_c);
    let fluid = CatalogModel.properties(fluid_kind, temperature)?;

    let mut builder = TopologyBuilder::new();
    for node in &doc.nodes {
        builder.add_node(node.id.as_str())?;
    }
    let mut bodies = Vec::with_capacity(doc.pipes.len());
    for pipe in &doc.pipes {
        let (from, to) = pipe.oriented();
        let from = lookup_node(&builder, from)?;
        let to = lookup_node(&builder, to)?;
        builder.add_edge(pipe.id.as_str(), from, to)?;
        bodies.push(pipe_body(pipe)?);
    }
    let topology = builder.build()?;

    let mut network = Network::new(topology, bodies, fluid, temperature)?;

    for v in &doc.valves {
        let (node, edge) = attachment(network.topology(), &v.id, &v.pipe)?;
        let valve = GateValve::new(v.id.as_str(), mm(v.diameter_mm))?;
        network.add_fitting(node, edge, Box::new(valve))?;
    }
    for r in &doc.reducers {
        let (node, edge) = attachment(network.topology(), &r.id, &r.pipe)?;
        let reducer = Reducer::new(r.id.as_str(), mm(r.inlet_mm), mm(r.outlet_mm), r.angle_deg)?;
        network.add_fitting(node, edge, Box::new(reducer))?;
    }

    let special = doc
        .limit_pressure_valves
        .iter()
        .map(|v| {
            let kind = SpecialValveKind::LimitPressure {
                set_pressure: v.set_pressure_kpa * 1000.0,
            };
            (&v.id, &v.pipe, kind)
        })
        .chain(doc.limit_flow_valves.iter().map(|v| {
            let kind = SpecialValveKind::LimitFlow {
                set_flow: v.set_flow_m3_min,
            };
            (&v.id, &v.pipe, kind)
        }))
        .chain(doc.limit_drop_valves.iter().map(|v| {
            let kind = SpecialValveKind::LimitDrop {
                set_drop: v.set_drop_kpa * 1000.0,
            };
            (&v.id, &v.pipe, kind)
        }));
    for (id, pipe, kind) in special {
        let (node, edge) = attachment(network.topology(), id, pipe)?;
        network.add_special_valve(node, edge, SpecialValve::new(id.as_str(), kind)?)?;
    }

    for s in &doc.stations {
        let (node, edge) = attachment(network.topology(), &s.id, &s.pipe)?;
        let mut station = CompressorStation::new(
            s.id.as_str(),
            s.compressors.count as usize,
            m3pmin(s.compressors.max_flow_m3_min),
            s.compressors.min_degree_pct / 100.0,
        )?;
        if let Some(p) = s.power {
            station = station.with_power_model(PowerModel {
                c1: p.c1,
                c2: p.c2,
                c3: p.c3,
            });
        }
        network.add_station(node, edge, station)?;
    }
    for u in &doc.users {
        let (node, edge) = attachment(network.topology(), &u.id, &u.pipe)?;
        let user = User::new(u.id.as_str(), m3pmin(u.demand_m3_min), kpa(u.min_pressure_kpa))?;
        network.add_user(node, edge, user)?;
    }

    let pressures = doc.stations.iter().map(|s| s.pressure_kpa * 1000.0).collect();
    let boundary = Boundary::with_default_demands(&network, pressures);

    info!(
        network = doc.name.as_str(),
        nodes = network.topology().node_count(),
        pipes = network.topology().edge_count(),
        stations = network.sources().len(),
        users = network.sinks().len(),
        "compiled network"
    );

    Ok(CompiledNetwork {
        name: doc.name.clone(),
        network,
        boundary,
        fluid,
    })
}

fn lookup_node(builder: &TopologyBuilder, id: &str) -> AppResult<NodeId> {
    builder
        .node_id(id)
        .ok_or_else(|| AppError::Compile(format!("Node not found: {id}")))
}

fn attachment(topology: &Topology, node: &str, pipe: &str) -> AppResult<(NodeId, EdgeId)> {
    Ok((topology.require_node(node)?, topology.require_edge(pipe)?))
}

fn pipe_body(pipe: &PipeDef) -> AppResult<CompositePipe> {
    let sections = pipe
        .sections
        .iter()
        .map(|s| StraightSection::new(m(s.length_m), mm(s.diameter_mm), mm(s.roughness_mm)))
        .collect();
    let bends = pipe
        .bends
        .iter()
        .map(|b| BendSection::with_radius_ratio(b.count, b.angle_deg, b.radius_ratio))
        .collect();
    Ok(CompositePipe::new(pipe.id.as_str(), sections, bends)?)
}
