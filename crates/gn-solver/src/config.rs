//! Solver configuration.

use gn_components::FrictionConfig;
use serde::{Deserialize, Serialize};

/// Fixed-point iteration controls.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum relative flow change accepted as converged
    pub tolerance: f64,
    /// Iteration cap after the initial pass
    pub max_iterations: usize,
    /// Any edge below this volumetric flow (m³/min) stops the loop
    pub min_flow: f64,
    pub friction: FrictionConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            max_iterations: 25,
            min_flow: 0.2,
            friction: FrictionConfig::default(),
        }
    }
}
