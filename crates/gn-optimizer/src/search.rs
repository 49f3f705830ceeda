//! Population search over bounded, gridded pressure vectors.
//!
//! Each generation runs a search phase (move towards the global best with
//! jitter) and a reaction phase (move relative to one randomly picked member).
//! A move is kept only when it lowers that individual's cost.

use gn_core::numeric::snap_to_step;
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::OptimizerConfig;
use crate::error::OptimizerResult;

/// A global best must drop by more than this to count as progress.
const IMPROVEMENT_EPS: f64 = 1e-6;

/// Share of the bound range used when seeding near the baseline.
const NEAR_BASELINE_SPAN: f64 = 0.2;

/// Generations between progress reports.
const REPORT_EVERY: usize = 20;

/// Where a run currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    BoundsInitialized,
    PopulationSeeded,
    Iterating { stalled: bool },
    Exhausted,
    Validated { accepted: bool },
    Done,
}

/// Per-dimension search box on the step grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub step: f64,
}

impl Bounds {
    /// Box `[p - lower_offset, p + upper_offset]` around each setpoint,
    /// shrunk inwards to the step grid and kept above zero.
    pub fn around(center: &[f64], cfg: &OptimizerConfig) -> Self {
        let step = cfg.step_size;
        let mut lower = Vec::with_capacity(center.len());
        let mut upper = Vec::with_capacity(center.len());
        for &p in center {
            let mut lo = ((p - cfg.lower_offset) / step).ceil() * step;
            let mut hi = ((p + cfg.upper_offset) / step).floor() * step;
            lo = lo.max(step);
            if lo > hi {
                let snapped = snap_to_step(p, step).max(step);
                lo = snapped;
                hi = snapped;
            }
            lower.push(lo);
            upper.push(hi);
        }
        Self { lower, upper, step }
    }

    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Snap to the grid, then clamp into the box.
    pub fn snap_clamp(&self, d: usize, value: f64) -> f64 {
        snap_to_step(value, self.step).clamp(self.lower[d], self.upper[d])
    }

    fn near(&self, center: &[f64], rng: &mut StdRng) -> Vec<f64> {
        (0..self.dimension())
            .map(|d| {
                let span = (self.upper[d] - self.lower[d]) * NEAR_BASELINE_SPAN;
                let offset = (rng.random::<f64>() - 0.5) * 2.0 * span;
                self.snap_clamp(d, center[d] + offset)
            })
            .collect()
    }

    fn uniform(&self, rng: &mut StdRng) -> Vec<f64> {
        (0..self.dimension())
            .map(|d| {
                let x = self.lower[d] + rng.random::<f64>() * (self.upper[d] - self.lower[d]);
                self.snap_clamp(d, x)
            })
            .collect()
    }
}

/// State of one population run.
pub struct Search {
    cfg: OptimizerConfig,
    bounds: Bounds,
    rng: StdRng,
    population: Vec<Vec<f64>>,
    fitness: Vec<f64>,
    best: Vec<f64>,
    best_fitness: f64,
    stall: usize,
    generation: usize,
    evaluations: usize,
    phase: Phase,
}

impl Search {
    /// Bounds around `baseline`, whose cost is already known.
    pub fn new(
        cfg: OptimizerConfig,
        baseline: Vec<f64>,
        baseline_fitness: f64,
        rng: StdRng,
    ) -> Self {
        let bounds = Bounds::around(&baseline, &cfg);
        let mut search = Self {
            cfg,
            bounds,
            rng,
            population: vec![baseline.clone()],
            fitness: vec![baseline_fitness],
            best: baseline,
            best_fitness: baseline_fitness,
            stall: 0,
            generation: 0,
            evaluations: 0,
            phase: Phase::Idle,
        };
        search.enter(Phase::BoundsInitialized);
        search
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, "optimizer phase");
        self.phase = phase;
    }

    /// Record the verdict on the best candidate and close the run.
    pub fn finish(&mut self, accepted: bool) {
        self.enter(Phase::Validated { accepted });
        self.enter(Phase::Done);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn best(&self) -> (&[f64], f64) {
        (&self.best, self.best_fitness)
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Fill the population: slot 0 keeps the baseline, the first half of the
    /// rest starts near it and the second half anywhere in the box.
    pub fn seed<F>(&mut self, cost: &mut F) -> OptimizerResult<()>
    where
        F: FnMut(&[f64]) -> OptimizerResult<f64>,
    {
        let size = self.cfg.population_size;
        let baseline = self.population[0].clone();
        for i in 1..size {
            let candidate = if i < size / 2 {
                self.bounds.near(&baseline, &mut self.rng)
            } else {
                self.bounds.uniform(&mut self.rng)
            };
            let f = self.evaluate(cost, &candidate)?;
            self.population.push(candidate);
            self.fitness.push(f);
        }
        self.update_best();
        self.enter(Phase::PopulationSeeded);
        Ok(())
    }

    /// Run one generation. Returns `false` once the budget or the stall
    /// limit is reached.
    pub fn step<F>(&mut self, cost: &mut F) -> OptimizerResult<bool>
    where
        F: FnMut(&[f64]) -> OptimizerResult<f64>,
    {
        if self.phase == Phase::Exhausted {
            return Ok(false);
        }
        let previous = self.best_fitness;

        self.search_phase(cost)?;
        self.reaction_phase(cost)?;
        self.update_best();
        self.generation += 1;

        if self.best_fitness < previous - IMPROVEMENT_EPS {
            self.stall = 0;
        } else {
            self.stall += 1;
        }
        self.enter(Phase::Iterating {
            stalled: self.stall > 0,
        });

        if self.generation % REPORT_EVERY == 0 {
            info!(
                generation = self.generation,
                best = self.best_fitness,
                "optimizer progress"
            );
        }

        if self.stall >= self.cfg.stall_generations {
            info!(generations = self.stall, "no improvement, stopping early");
            self.enter(Phase::Exhausted);
        } else if self.generation >= self.cfg.max_generations {
            self.enter(Phase::Exhausted);
        }
        Ok(self.phase != Phase::Exhausted)
    }

    /// Towards the global best: `x + r·(best − flag·x) + jitter` per dimension.
    fn search_phase<F>(&mut self, cost: &mut F) -> OptimizerResult<()>
    where
        F: FnMut(&[f64]) -> OptimizerResult<f64>,
    {
        for i in 0..self.population.len() {
            let candidate: Vec<f64> = (0..self.bounds.dimension())
                .map(|d| {
                    let x = self.population[i][d];
                    let flag = f64::from(u8::from(self.rng.random_bool(0.5)));
                    let jitter = (self.rng.random::<f64>() - 0.5) * self.bounds.step;
                    let moved = x + self.rng.random::<f64>() * (self.best[d] - flag * x) + jitter;
                    self.bounds.snap_clamp(d, moved)
                })
                .collect();
            self.accept_if_better(cost, i, candidate)?;
        }
        Ok(())
    }

    /// Relative to one random member: `x + r·(target − flag·x)`.
    fn reaction_phase<F>(&mut self, cost: &mut F) -> OptimizerResult<()>
    where
        F: FnMut(&[f64]) -> OptimizerResult<f64>,
    {
        let target = self.population[self.rng.random_range(0..self.population.len())].clone();
        for i in 0..self.population.len() {
            let flag = f64::from(u8::from(self.rng.random_bool(0.5)));
            let candidate: Vec<f64> = (0..self.bounds.dimension())
                .map(|d| {
                    let x = self.population[i][d];
                    let moved = x + self.rng.random::<f64>() * (target[d] - flag * x);
                    self.bounds.snap_clamp(d, moved)
                })
                .collect();
            self.accept_if_better(cost, i, candidate)?;
        }
        Ok(())
    }

    fn accept_if_better<F>(
        &mut self,
        cost: &mut F,
        i: usize,
        candidate: Vec<f64>,
    ) -> OptimizerResult<()>
    where
        F: FnMut(&[f64]) -> OptimizerResult<f64>,
    {
        let f = self.evaluate(cost, &candidate)?;
        if f < self.fitness[i] {
            self.population[i] = candidate;
            self.fitness[i] = f;
        }
        Ok(())
    }

    fn evaluate<F>(&mut self, cost: &mut F, candidate: &[f64]) -> OptimizerResult<f64>
    where
        F: FnMut(&[f64]) -> OptimizerResult<f64>,
    {
        self.evaluations += 1;
        cost(candidate)
    }

    fn update_best(&mut self) {
        for (x, &f) in self.population.iter().zip(&self.fitness) {
            if f < self.best_fitness {
                self.best.clone_from(x);
                self.best_fitness = f;
            }
        }
    }
}
