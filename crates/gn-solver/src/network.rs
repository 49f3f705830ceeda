//! Static description of one network: topology, edge physics, sources and sinks.

use gn_components::{CompositePipe, CompressorStation, ResistanceTerm, SpecialValve, User};
use gn_core::units::{Temperature, raw};
use gn_core::{EdgeId, NodeId};
use gn_fluids::FluidProperties;
use gn_graph::Topology;

use crate::error::{SolverError, SolverResult};

/// Compressor station bound to its node and outlet edge.
#[derive(Debug, Clone)]
pub struct Source {
    pub node: NodeId,
    pub edge: EdgeId,
    pub station: CompressorStation,
}

/// User bound to its node and supply edge.
#[derive(Debug, Clone)]
pub struct Sink {
    pub node: NodeId,
    pub edge: EdgeId,
    pub user: User,
}

/// Fitting adding resistance to an edge.
pub struct AttachedFitting {
    pub node: NodeId,
    pub edge: EdgeId,
    pub term: Box<dyn ResistanceTerm>,
}

/// Special valve overriding an edge's resistance.
#[derive(Debug, Clone)]
pub struct AttachedValve {
    pub node: NodeId,
    pub edge: EdgeId,
    pub valve: SpecialValve,
}

/// Everything the solver needs that does not change between requests.
///
/// Boundary values (station pressures, demands) live in `Boundary`.
pub struct Network {
    topology: Topology,
    pipes: Vec<CompositePipe>,
    fittings: Vec<AttachedFitting>,
    valves: Vec<AttachedValve>,
    sources: Vec<Source>,
    sinks: Vec<Sink>,
    fluid: FluidProperties,
    temperature: f64,
}

impl Network {
    /// `pipes[i]` is the body of edge `i`.
    pub fn new(
        topology: Topology,
        pipes: Vec<CompositePipe>,
        fluid: FluidProperties,
        temperature: Temperature,
    ) -> SolverResult<Self> {
        if pipes.len() != topology.edge_count() {
            return Err(SolverError::setup(format!(
                "{} pipe bodies for {} edges",
                pipes.len(),
                topology.edge_count()
            )));
        }
        let temperature = raw::kelvin(temperature);
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(SolverError::setup("non-positive temperature"));
        }
        let rho0 = fluid.rho0();
        if !rho0.is_finite() || rho0 <= 0.0 {
            return Err(SolverError::setup("non-positive reference density"));
        }
        Ok(Self {
            topology,
            pipes,
            fittings: Vec::new(),
            valves: Vec::new(),
            sources: Vec::new(),
            sinks: Vec::new(),
            fluid,
            temperature,
        })
    }

    fn check_attachment(&self, what: &str, node: NodeId, edge: EdgeId) -> SolverResult<()> {
        let Some(e) = self.topology.edge(edge) else {
            return Err(SolverError::setup(format!("{what}: edge {edge} out of range")));
        };
        if self.topology.node(node).is_none() {
            return Err(SolverError::setup(format!("{what}: node {node} out of range")));
        }
        if e.other(node).is_none() {
            return Err(SolverError::setup(format!(
                "{what}: edge '{}' does not touch node '{}'",
                e.name,
                self.topology.nodes()[node.idx()].name
            )));
        }
        Ok(())
    }

    pub fn add_fitting(
        &mut self,
        node: NodeId,
        edge: EdgeId,
        term: Box<dyn ResistanceTerm>,
    ) -> SolverResult<()> {
        self.check_attachment(term.name(), node, edge)?;
        self.fittings.push(AttachedFitting { node, edge, term });
        Ok(())
    }

    pub fn add_special_valve(
        &mut self,
        node: NodeId,
        edge: EdgeId,
        valve: SpecialValve,
    ) -> SolverResult<()> {
        self.check_attachment(valve.name(), node, edge)?;
        self.valves.push(AttachedValve { node, edge, valve });
        Ok(())
    }

    pub fn add_station(
        &mut self,
        node: NodeId,
        edge: EdgeId,
        station: CompressorStation,
    ) -> SolverResult<()> {
        self.check_attachment(station.name(), node, edge)?;
        if self.is_source(node) {
            return Err(SolverError::setup(format!(
                "node of station '{}' already holds a station",
                station.name()
            )));
        }
        if self.sinks.iter().any(|s| s.node == node) {
            return Err(SolverError::setup(format!(
                "station '{}' placed on a user node",
                station.name()
            )));
        }
        self.sources.push(Source {
            node,
            edge,
            station,
        });
        Ok(())
    }

    pub fn add_user(&mut self, node: NodeId, edge: EdgeId, user: User) -> SolverResult<()> {
        self.check_attachment(user.name(), node, edge)?;
        if self.is_source(node) {
            return Err(SolverError::setup(format!(
                "user '{}' placed on a station node",
                user.name()
            )));
        }
        self.sinks.push(Sink { node, edge, user });
        Ok(())
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn pipes(&self) -> &[CompositePipe] {
        &self.pipes
    }

    pub fn fittings(&self) -> &[AttachedFitting] {
        &self.fittings
    }

    pub fn special_valves(&self) -> &[AttachedValve] {
        &self.valves
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn sinks(&self) -> &[Sink] {
        &self.sinks
    }

    pub fn fluid(&self) -> FluidProperties {
        self.fluid
    }

    /// Gas temperature, K.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn is_source(&self, node: NodeId) -> bool {
        self.sources.iter().any(|s| s.node == node)
    }

    pub fn source_index(&self, name: &str) -> Option<usize> {
        self.sources.iter().position(|s| s.station.name() == name)
    }

    pub fn sink_index(&self, name: &str) -> Option<usize> {
        self.sinks.iter().position(|s| s.user.name() == name)
    }
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Network")
            .field("nodes", &self.topology.node_count())
            .field("edges", &self.topology.edge_count())
            .field("fittings", &self.fittings.len())
            .field("special_valves", &self.valves.len())
            .field("sources", &self.sources.len())
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
