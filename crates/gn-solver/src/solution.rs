//! Solved network state.

use serde::Serialize;

use crate::network::Network;

/// How the fixed-point loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveOutcome {
    /// Relative flow change fell below tolerance.
    Converged,
    /// Iteration cap reached first.
    IterationCap,
    /// An edge flow dropped below the operational threshold.
    DegenerateFlow,
    /// The reduced nodal system could not be factorised.
    Singular,
}

impl SolveOutcome {
    pub fn is_converged(self) -> bool {
        self == SolveOutcome::Converged
    }
}

/// A broken feasibility condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    NanPressure { node: String },
    UnderPressure { user: String, pressure: f64, min: f64 },
    ReversedSource { station: String, flow: f64 },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::NanPressure { node } => write!(f, "pressure at '{node}' is NaN"),
            Violation::UnderPressure {
                user,
                pressure,
                min,
            } => write!(
                f,
                "user '{user}' at {:.1} kPa, below {:.1} kPa",
                pressure / 1000.0,
                min / 1000.0
            ),
            Violation::ReversedSource { station, flow } => {
                write!(f, "station '{station}' takes in {:.3} m³/min", flow.abs())
            }
        }
    }
}

/// Node pressures and edge flows of one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct HydraulicSolution {
    /// Absolute pressure per node, Pa.
    pub pressures: Vec<f64>,
    /// Volumetric flow per edge at reference density, m³/min (positive `from → to`).
    pub flows: Vec<f64>,
    /// Highest station pressure, Pa.
    pub base_pressure: f64,
    /// Loop iterations after the initial pass.
    pub iterations: usize,
    pub outcome: SolveOutcome,
    pub feasible: bool,
    pub violations: Vec<Violation>,
}

impl HydraulicSolution {
    /// Flow leaving station `i` through its outlet edge, m³/min.
    pub fn station_outflow(&self, network: &Network, i: usize) -> f64 {
        let source = &network.sources()[i];
        let a = network.topology().incidence();
        -a[(source.node.idx(), source.edge.idx())] * self.flows[source.edge.idx()]
    }

    /// Flow arriving at user `i` through its supply edge, m³/min.
    pub fn user_inflow(&self, network: &Network, i: usize) -> f64 {
        let sink = &network.sinks()[i];
        let a = network.topology().incidence();
        a[(sink.node.idx(), sink.edge.idx())] * self.flows[sink.edge.idx()]
    }

    pub fn station_pressure(&self, network: &Network, i: usize) -> f64 {
        self.pressures[network.sources()[i].node.idx()]
    }

    pub fn user_pressure(&self, network: &Network, i: usize) -> f64 {
        self.pressures[network.sinks()[i].node.idx()]
    }
}
