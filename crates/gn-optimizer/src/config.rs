//! Optimizer configuration.

use serde::{Deserialize, Serialize};

use crate::error::{OptimizerError, OptimizerResult};

/// Population search controls. Pressures in Pa.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub population_size: usize,
    pub max_generations: usize,
    /// Pressure grid spacing
    pub step_size: f64,
    /// How far below the current setpoint a station may go
    pub lower_offset: f64,
    /// How far above the current setpoint a station may go
    pub upper_offset: f64,
    /// Generations without a better global best before stopping
    pub stall_generations: usize,
    /// Fixed seed for reproducible runs; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            max_generations: 100,
            step_size: 1000.0,
            lower_offset: 50_000.0,
            upper_offset: 10_000.0,
            stall_generations: 200,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> OptimizerResult<()> {
        let invalid = |what: &str| {
            Err(OptimizerError::InvalidConfig {
                what: what.to_string(),
            })
        };
        if self.population_size == 0 {
            return invalid("population size must be positive");
        }
        if self.max_generations == 0 {
            return invalid("generation count must be positive");
        }
        if !self.step_size.is_finite() || self.step_size <= 0.0 {
            return invalid("step size must be positive");
        }
        if !self.lower_offset.is_finite() || self.lower_offset < 0.0 {
            return invalid("lower offset must be non-negative");
        }
        if !self.upper_offset.is_finite() || self.upper_offset < 0.0 {
            return invalid("upper offset must be non-negative");
        }
        if self.stall_generations == 0 {
            return invalid("stall limit must be positive");
        }
        Ok(())
    }
}
