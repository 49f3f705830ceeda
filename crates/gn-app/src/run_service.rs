//! Steady calculation and optimization runs.

use std::path::Path;
use std::time::Instant;

use gn_optimizer::{CancelToken, OptimizerConfig, PressureOptimizer, Verdict};
use gn_project::NetworkDoc;
use gn_results::{NetworkReport, project};
use gn_solver::{HydraulicSolution, SolveOutcome, Violation, solve};
use serde::Serialize;
use tracing::{info, warn};

use crate::compile::compile_network;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Static,
    Optimize,
}

/// Everything a run hands back, infeasible or not.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub network: String,
    pub mode: RunMode,
    pub outcome: SolveOutcome,
    pub iterations: usize,
    pub feasible: bool,
    pub violations: Vec<Violation>,
    pub elapsed_s: f64,
    pub report: NetworkReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization: Option<OptimizationSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationSummary {
    pub verdict: Verdict,
    pub baseline_fitness: f64,
    pub fitness: f64,
    pub generations: usize,
    pub evaluations: usize,
    pub setpoints: Vec<StationSetpoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSetpoint {
    pub station: String,
    pub before_kpa: f64,
    pub after_kpa: f64,
}

/// Solve at the document's own station pressures.
pub fn run_static(doc: &NetworkDoc) -> AppResult<RunReport> {
    let started = Instant::now();
    let compiled = compile_network(doc)?;
    let solution = solve(&compiled.network, &compiled.boundary)?;
    let report = project(&compiled.network, &solution)?;
    log_solution(&compiled.name, &solution);
    Ok(assemble(
        &compiled.name,
        RunMode::Static,
        &solution,
        report,
        started,
        None,
    ))
}

/// Optimize station pressures, then report the accepted (or restored) state.
pub fn run_optimize(
    doc: &NetworkDoc,
    config: OptimizerConfig,
    cancel: &CancelToken,
) -> AppResult<RunReport> {
    let started = Instant::now();
    let compiled = compile_network(doc)?;
    let optimizer = PressureOptimizer::new(config)?;
    let run = optimizer.optimize(&compiled.network, &compiled.boundary, cancel)?;

    let setpoints = compiled
        .network
        .sources()
        .iter()
        .zip(&compiled.boundary.station_pressures)
        .zip(&run.boundary.station_pressures)
        .map(|((source, before), after)| StationSetpoint {
            station: source.station.name().to_string(),
            before_kpa: before / 1000.0,
            after_kpa: after / 1000.0,
        })
        .collect();
    if run.improved() {
        info!(
            baseline = run.baseline_fitness,
            fitness = run.fitness,
            "optimized setpoints accepted"
        );
    } else {
        warn!(verdict = ?run.verdict, "kept the document's setpoints");
    }
    log_solution(&compiled.name, &run.solution);

    let summary = OptimizationSummary {
        verdict: run.verdict,
        baseline_fitness: run.baseline_fitness,
        fitness: run.fitness,
        generations: run.generations,
        evaluations: run.evaluations,
        setpoints,
    };
    Ok(assemble(
        &compiled.name,
        RunMode::Optimize,
        &run.solution,
        run.report,
        started,
        Some(summary),
    ))
}

/// Document optimizer block laid over `base`; step is given in kPa.
pub fn optimizer_config(doc: &NetworkDoc, base: OptimizerConfig) -> OptimizerConfig {
    let mut cfg = base;
    if let Some(opt) = &doc.optimizer {
        if let Some(n) = opt.population_size {
            cfg.population_size = n;
        }
        if let Some(n) = opt.max_generations {
            cfg.max_generations = n;
        }
        if let Some(step) = opt.step_kpa {
            cfg.step_size = step * 1000.0;
        }
        if opt.seed.is_some() {
            cfg.seed = opt.seed;
        }
    }
    cfg
}

/// Write `report` as pretty JSON.
pub fn write_report(path: &Path, report: &RunReport) -> AppResult<()> {
    let content = serde_json::to_string_pretty(report)
        .map_err(|e| AppError::Results(format!("Failed to serialize report: {e}")))?;
    std::fs::write(path, content).map_err(|e| AppError::ReportWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn log_solution(name: &str, solution: &HydraulicSolution) {
    if solution.feasible {
        info!(
            network = name,
            outcome = ?solution.outcome,
            iterations = solution.iterations,
            "network solved"
        );
    } else {
        warn!(network = name, outcome = ?solution.outcome, "network infeasible");
        for v in &solution.violations {
            warn!(network = name, "{v}");
        }
    }
}

fn assemble(
    name: &str,
    mode: RunMode,
    solution: &HydraulicSolution,
    report: NetworkReport,
    started: Instant,
    optimization: Option<OptimizationSummary>,
) -> RunReport {
    RunReport {
        network: name.to_string(),
        mode,
        outcome: solution.outcome,
        iterations: solution.iterations,
        feasible: solution.feasible,
        violations: solution.violations.clone(),
        elapsed_s: started.elapsed().as_secs_f64(),
        report,
        optimization,
    }
}
