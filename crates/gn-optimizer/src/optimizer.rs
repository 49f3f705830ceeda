//! Pressure optimizer: baseline, population search, confirmation.

use gn_results::{NetworkReport, project};
use gn_solver::{Boundary, HydraulicSolution, HydraulicSolver, Network};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::cancel::CancelToken;
use crate::config::OptimizerConfig;
use crate::error::OptimizerResult;
use crate::search::{Phase, Search};

const POWER_WEIGHT: f64 = 0.7;
const EFFICIENCY_WEIGHT: f64 = 200.0;

/// Cost of a projected solution; lower is better, infeasible is `+∞`.
pub fn fitness_of(solution: &HydraulicSolution, report: &NetworkReport) -> f64 {
    if !solution.feasible {
        return f64::INFINITY;
    }
    POWER_WEIGHT * report.system.total_power_kw
        - EFFICIENCY_WEIGHT * report.system.total_efficiency
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// A cheaper feasible setpoint was found and confirmed.
    Accepted,
    /// Nothing beat the baseline.
    NoImprovement,
    /// The best candidate failed its confirming solve.
    ConfirmationFailed,
    Cancelled,
}

/// Result of `PressureOptimizer::optimize`.
#[derive(Clone, Debug)]
pub struct Optimization {
    /// Boundary to apply: improved or the unchanged input.
    pub boundary: Boundary,
    pub solution: HydraulicSolution,
    pub report: NetworkReport,
    pub fitness: f64,
    pub baseline_fitness: f64,
    pub verdict: Verdict,
    pub generations: usize,
    pub evaluations: usize,
    pub phase: Phase,
}

impl Optimization {
    pub fn improved(&self) -> bool {
        self.verdict == Verdict::Accepted
    }
}

/// Population search over station pressures with solve + project as cost.
#[derive(Debug, Clone)]
pub struct PressureOptimizer {
    config: OptimizerConfig,
    solver: HydraulicSolver,
}

struct Evaluated {
    fitness: f64,
    solution: HydraulicSolution,
    report: NetworkReport,
}

impl PressureOptimizer {
    pub fn new(config: OptimizerConfig) -> OptimizerResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            solver: HydraulicSolver::default(),
        })
    }

    pub fn with_solver(mut self, solver: HydraulicSolver) -> Self {
        self.solver = solver;
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Search for station pressures cheaper than `boundary`'s.
    ///
    /// Never returns a state costlier than the input: without a confirmed
    /// improvement the input boundary comes back, freshly solved.
    pub fn optimize(
        &self,
        network: &Network,
        boundary: &Boundary,
        cancel: &CancelToken,
    ) -> OptimizerResult<Optimization> {
        let baseline = self.settle(network, boundary)?;
        let baseline_fitness = baseline.fitness;
        info!(
            stations = boundary.station_pressures.len(),
            population = self.config.population_size,
            generations = self.config.max_generations,
            baseline = baseline_fitness,
            "starting pressure optimization"
        );

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let start: Vec<f64> = boundary.station_pressures.iter().map(|p| p.round()).collect();
        let mut search = Search::new(self.config, start, baseline_fitness, rng);
        let mut cost = |pressures: &[f64]| -> OptimizerResult<f64> {
            Ok(self.evaluate(network, boundary, pressures)?.fitness)
        };

        if cancel.is_cancelled() {
            return Ok(self.restore(baseline, boundary, &mut search, Verdict::Cancelled));
        }
        search.seed(&mut cost)?;
        loop {
            if cancel.is_cancelled() {
                warn!(generation = search.generation(), "optimization cancelled");
                return Ok(self.restore(baseline, boundary, &mut search, Verdict::Cancelled));
            }
            if !search.step(&mut cost)? {
                break;
            }
        }

        let (best, best_fitness) = search.best();
        if best_fitness >= baseline_fitness {
            warn!(
                baseline = baseline_fitness,
                best = best_fitness,
                "no setpoint beats the current one, keeping it"
            );
            let fresh = self.settle(network, boundary)?;
            return Ok(self.restore(fresh, boundary, &mut search, Verdict::NoImprovement));
        }

        let pressures: Vec<f64> = best
            .iter()
            .enumerate()
            .map(|(d, &p)| search.bounds().snap_clamp(d, p).round())
            .collect();
        let candidate = self.evaluate(network, boundary, &pressures)?;
        if !candidate.solution.feasible || candidate.fitness >= baseline_fitness {
            warn!(
                fitness = candidate.fitness,
                "best setpoint failed its confirming solve, rolling back"
            );
            let fresh = self.settle(network, boundary)?;
            return Ok(self.restore(fresh, boundary, &mut search, Verdict::ConfirmationFailed));
        }

        search.finish(true);
        info!(
            improvement = baseline_fitness - candidate.fitness,
            generations = search.generation(),
            "accepted optimized pressures"
        );
        Ok(Optimization {
            boundary: Boundary::new(pressures, boundary.demands.clone()),
            solution: candidate.solution,
            report: candidate.report,
            fitness: candidate.fitness,
            baseline_fitness,
            verdict: Verdict::Accepted,
            generations: search.generation(),
            evaluations: search.evaluations(),
            phase: search.phase(),
        })
    }

    /// Solve and project `boundary` exactly as given.
    fn settle(&self, network: &Network, boundary: &Boundary) -> OptimizerResult<Evaluated> {
        let solution = self.solver.solve(network, boundary)?;
        let report = project(network, &solution)?;
        let fitness = fitness_of(&solution, &report);
        Ok(Evaluated {
            fitness,
            solution,
            report,
        })
    }

    /// Cost of `pressures` (rounded to whole pascals) with `template`'s demands.
    fn evaluate(
        &self,
        network: &Network,
        template: &Boundary,
        pressures: &[f64],
    ) -> OptimizerResult<Evaluated> {
        let candidate = Boundary::new(
            pressures.iter().map(|p| p.round()).collect(),
            template.demands.clone(),
        );
        self.settle(network, &candidate)
    }

    fn restore(
        &self,
        baseline: Evaluated,
        boundary: &Boundary,
        search: &mut Search,
        verdict: Verdict,
    ) -> Optimization {
        search.finish(false);
        Optimization {
            boundary: boundary.clone(),
            fitness: baseline.fitness,
            baseline_fitness: baseline.fitness,
            solution: baseline.solution,
            report: baseline.report,
            verdict,
            generations: search.generation(),
            evaluations: search.evaluations(),
            phase: search.phase(),
        }
    }
}
