//! Edge-indexed table of fitting and special-valve rules, built once per solve.

use gn_components::OverrideInputs;
use gn_components::SpecialValveKind;
use nalgebra::DVector;

use crate::network::Network;

/// A special valve resolved to edge and endpoint indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverrideRule {
    pub edge: usize,
    pub from: usize,
    pub to: usize,
    /// Index into `Network::special_valves()`.
    pub valve: usize,
}

#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    /// Indices into `Network::fittings()` per edge.
    pub fittings_by_edge: Vec<Vec<usize>>,
    /// Special valves in evaluation order.
    pub rules: Vec<OverrideRule>,
    /// `(node, setpoint Pa)` of every limit-pressure valve.
    pub pressure_clamps: Vec<(usize, f64)>,
}

impl OverrideTable {
    pub fn build(network: &Network) -> Self {
        let topology = network.topology();
        let mut fittings_by_edge = vec![Vec::new(); topology.edge_count()];
        for (k, fitting) in network.fittings().iter().enumerate() {
            fittings_by_edge[fitting.edge.idx()].push(k);
        }

        let mut rules: Vec<OverrideRule> = network
            .special_valves()
            .iter()
            .enumerate()
            .filter_map(|(k, attached)| {
                let edge = topology.edge(attached.edge)?;
                Some(OverrideRule {
                    edge: attached.edge.idx(),
                    from: edge.from.idx(),
                    to: edge.to.idx(),
                    valve: k,
                })
            })
            .collect();
        let valves = network.special_valves();
        rules.sort_by_key(|r| (valves[r.valve].valve.kind.rank(), r.valve));

        let pressure_clamps = valves
            .iter()
            .filter_map(|attached| match attached.valve.kind {
                SpecialValveKind::LimitPressure { set_pressure } => {
                    Some((attached.node.idx(), set_pressure))
                }
                _ => None,
            })
            .collect();

        Self {
            fittings_by_edge,
            rules,
            pressure_clamps,
        }
    }

    /// Override `resistance` with every special valve, in rank order.
    ///
    /// `drops` are node pressure drops below `base`, `flows` the last computed
    /// mass flows.
    pub fn apply(
        &self,
        network: &Network,
        resistance: &mut DVector<f64>,
        drops: &DVector<f64>,
        flows: &DVector<f64>,
        base: f64,
    ) {
        let rho0 = network.fluid().rho0();
        let valves = network.special_valves();
        for rule in &self.rules {
            let mass_flow = flows[rule.edge];
            let upstream = if mass_flow > 0.0 { rule.from } else { rule.to };
            let inputs = OverrideInputs {
                drop_across: (drops[rule.from] - drops[rule.to]).abs(),
                mass_flow,
                upstream_pressure: base - drops[upstream],
                rho0,
            };
            resistance[rule.edge] = valves[rule.valve].valve.apply(resistance[rule.edge], &inputs);
        }
    }

    /// Pin limit-pressure valve nodes to their setpoint.
    pub fn clamp_pressures(&self, drops: &mut DVector<f64>, base: f64) {
        for &(node, set_pressure) in &self.pressure_clamps {
            drops[node] = base - set_pressure;
        }
    }
}
