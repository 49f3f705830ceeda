//! Fixed-point (Picard) hydraulic balance.

use gn_components::common::{gas_density, mass_to_volumetric, reynolds, velocity, volumetric_to_mass};
use gn_components::{EdgeState, ResistanceTerm, friction_factor};
use gn_core::numeric::safe_recip_product;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, warn};

use crate::boundary::Boundary;
use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::network::Network;
use crate::overrides::OverrideTable;
use crate::solution::{HydraulicSolution, SolveOutcome, Violation};

/// Solve with the default configuration.
pub fn solve(network: &Network, boundary: &Boundary) -> SolverResult<HydraulicSolution> {
    HydraulicSolver::default().solve(network, boundary)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HydraulicSolver {
    pub config: SolverConfig,
}

impl HydraulicSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Pressures and flows balancing `network` under `boundary`.
    ///
    /// Pure function of its inputs. Only malformed input is an `Err`.
    pub fn solve(&self, network: &Network, boundary: &Boundary) -> SolverResult<HydraulicSolution> {
        boundary.validate(network)?;
        let ctx = Context::new(network, boundary, &self.config);
        let cfg = &self.config;
        let edge_count = network.topology().edge_count();

        let mut estimate = DVector::from_element(edge_count, 1.0);
        let mut drops = ctx.initial_drops();

        let Some((first_drops, first_flows)) = ctx.pass(&drops, &estimate, None) else {
            warn!("reduced nodal system is singular on the initial pass");
            let nan_drops = ctx.unknown_drops();
            let nan_flows = DVector::from_element(edge_count, f64::NAN);
            return Ok(ctx.finish(&nan_drops, &nan_flows, 0, SolveOutcome::Singular));
        };
        drops = first_drops;
        let mut flows = first_flows;

        let mut iterations = 0;
        let mut outcome = SolveOutcome::IterationCap;
        while iterations < cfg.max_iterations {
            if ctx.has_stagnant_edge(&flows) {
                outcome = SolveOutcome::DegenerateFlow;
                break;
            }
            iterations += 1;
            if iterations == 1 {
                ctx.overrides.clamp_pressures(&mut drops, ctx.base);
            }

            let Some((new_drops, new_flows)) = ctx.pass(&drops, &estimate, Some(&flows)) else {
                outcome = SolveOutcome::Singular;
                break;
            };

            let change = max_relative_change(&new_flows, &estimate);
            estimate = (&estimate + &new_flows) * 0.5;
            drops = new_drops;
            flows = new_flows;
            debug!(iteration = iterations, change, "hydraulic iteration");

            if change <= cfg.tolerance {
                outcome = SolveOutcome::Converged;
                break;
            }
        }

        match outcome {
            SolveOutcome::Converged => {}
            SolveOutcome::IterationCap => {
                warn!(iterations, "hydraulic loop hit the iteration cap")
            }
            SolveOutcome::DegenerateFlow => {
                warn!(iterations, "near-zero edge flow, hydraulic loop stopped early")
            }
            SolveOutcome::Singular => warn!(iterations, "reduced nodal system is singular"),
        }

        Ok(ctx.finish(&drops, &flows, iterations, outcome))
    }
}

/// Largest `|(new − old)/old|`, counting NaN as no change.
fn max_relative_change(new: &DVector<f64>, old: &DVector<f64>) -> f64 {
    new.iter()
        .zip(old.iter())
        .map(|(q, est)| ((q - est) / est).abs())
        .map(|e| if e.is_nan() { 0.0 } else { e })
        .fold(0.0, f64::max)
}

/// Quantities fixed for the duration of one solve.
struct Context<'a> {
    network: &'a Network,
    config: &'a SolverConfig,
    overrides: OverrideTable,
    base: f64,
    /// Non-source node indices.
    free: Vec<usize>,
    /// Source node indices, in station order.
    fixed: Vec<usize>,
    fixed_drops: DVector<f64>,
    /// Mass withdrawal per free node, kg/s.
    withdrawals: DVector<f64>,
    rho0: f64,
    mu: f64,
}

impl<'a> Context<'a> {
    fn new(network: &'a Network, boundary: &Boundary, config: &'a SolverConfig) -> Self {
        let topology = network.topology();
        let base = boundary.base_pressure();

        let fixed: Vec<usize> = network.sources().iter().map(|s| s.node.idx()).collect();
        let free: Vec<usize> = (0..topology.node_count())
            .filter(|n| !fixed.contains(n))
            .collect();
        let fixed_drops =
            DVector::from_iterator(fixed.len(), boundary.station_pressures.iter().map(|p| base - p));

        let rho0 = network.fluid().rho0();
        let mut by_node = vec![0.0; topology.node_count()];
        for (sink, demand) in network.sinks().iter().zip(&boundary.demands) {
            by_node[sink.node.idx()] += volumetric_to_mass(*demand, rho0);
        }
        let withdrawals = DVector::from_iterator(free.len(), free.iter().map(|&n| by_node[n]));

        Self {
            network,
            config,
            overrides: OverrideTable::build(network),
            base,
            free,
            fixed,
            fixed_drops,
            withdrawals,
            rho0,
            mu: network.fluid().mu(),
        }
    }

    /// Source drops set, everything else at the base pressure.
    fn initial_drops(&self) -> DVector<f64> {
        let mut drops = DVector::zeros(self.network.topology().node_count());
        for (k, &n) in self.fixed.iter().enumerate() {
            drops[n] = self.fixed_drops[k];
        }
        drops
    }

    fn unknown_drops(&self) -> DVector<f64> {
        let mut drops = self.initial_drops();
        for &n in &self.free {
            drops[n] = f64::NAN;
        }
        drops
    }

    fn has_stagnant_edge(&self, flows: &DVector<f64>) -> bool {
        flows
            .iter()
            .any(|&q| mass_to_volumetric(q, self.rho0).abs() < self.config.min_flow)
    }

    /// Edge resistances at the given drops and flow estimate.
    fn resistances(&self, drops: &DVector<f64>, estimate: &DVector<f64>) -> DVector<f64> {
        let network = self.network;
        let t_k = network.temperature();
        let fittings = network.fittings();
        let edges = network.topology().edges();

        DVector::from_iterator(
            edges.len(),
            edges.iter().enumerate().map(|(e, edge)| {
                let mean_drop = 0.5 * (drops[edge.from.idx()] + drops[edge.to.idx()]);
                let density = gas_density(self.rho0, t_k, self.base - mean_drop);

                let pipe = &network.pipes()[e];
                let d = pipe.main_diameter();
                let v = velocity(estimate[e], d, density);
                let re = reynolds(v, d, density, self.mu);
                let state = EdgeState {
                    mass_flow: estimate[e],
                    density,
                    reynolds: re,
                    friction: friction_factor(d, re, pipe.roughness_mm(), self.config.friction),
                };

                let added: f64 = self.overrides.fittings_by_edge[e]
                    .iter()
                    .map(|&k| fittings[k].term.resistance(&state))
                    .sum();
                pipe.resistance(&state) + added
            }),
        )
    }

    /// One linearised solve. `None` when the reduced system is singular.
    ///
    /// Special valves act only once flows from a previous pass exist.
    fn pass(
        &self,
        drops: &DVector<f64>,
        estimate: &DVector<f64>,
        last_flows: Option<&DVector<f64>>,
    ) -> Option<(DVector<f64>, DVector<f64>)> {
        let a = self.network.topology().incidence();

        let mut resistance = self.resistances(drops, estimate);
        if let Some(flows) = last_flows {
            self.overrides
                .apply(self.network, &mut resistance, drops, flows, self.base);
        }

        let g = DVector::from_iterator(
            resistance.len(),
            resistance
                .iter()
                .zip(estimate.iter())
                .map(|(r, q)| safe_recip_product(1.0, r * q.abs())),
        );

        let mut ag: DMatrix<f64> = a.clone();
        for (j, mut col) in ag.column_iter_mut().enumerate() {
            col *= g[j];
        }
        let y = &ag * a.transpose();

        let mut full = self.initial_drops();
        if !self.free.is_empty() {
            let y_free = y.select_rows(self.free.iter());
            let y_ff = y_free.select_columns(self.free.iter());
            let y_fs = y_free.select_columns(self.fixed.iter());
            let rhs = &self.withdrawals - &y_fs * &self.fixed_drops;
            let solved = y_ff.lu().solve(&rhs)?;
            for (k, &n) in self.free.iter().enumerate() {
                full[n] = solved[k];
            }
        }

        let edge_dp = a.transpose() * &full;
        let flows = g.component_mul(&edge_dp);
        Some((full, flows))
    }

    fn finish(
        &self,
        drops: &DVector<f64>,
        flows: &DVector<f64>,
        iterations: usize,
        outcome: SolveOutcome,
    ) -> HydraulicSolution {
        let network = self.network;
        let topology = network.topology();
        let pressures: Vec<f64> = drops.iter().map(|d| self.base - d).collect();
        let flows: Vec<f64> = flows
            .iter()
            .map(|&q| mass_to_volumetric(q, self.rho0))
            .collect();

        let mut violations = Vec::new();
        for (node, p) in topology.nodes().iter().zip(&pressures) {
            if p.is_nan() {
                violations.push(Violation::NanPressure {
                    node: node.name.clone(),
                });
            }
        }
        for sink in network.sinks() {
            let p = pressures[sink.node.idx()];
            if p < sink.user.min_pressure {
                violations.push(Violation::UnderPressure {
                    user: sink.user.name().to_string(),
                    pressure: p,
                    min: sink.user.min_pressure,
                });
            }
        }
        let a = topology.incidence();
        for source in network.sources() {
            let inflow = a[(source.node.idx(), source.edge.idx())] * flows[source.edge.idx()];
            if inflow > 0.0 {
                violations.push(Violation::ReversedSource {
                    station: source.station.name().to_string(),
                    flow: -inflow,
                });
            }
        }

        let feasible = violations.is_empty() && outcome != SolveOutcome::Singular;
        debug!(iterations, ?outcome, feasible, "hydraulic solve finished");

        HydraulicSolution {
            pressures,
            flows,
            base_pressure: self.base,
            iterations,
            outcome,
            feasible,
            violations,
        }
    }
}
