//! Implicit turbulent friction factor.

use serde::{Deserialize, Serialize};

/// Sub-iteration controls for the friction factor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrictionConfig {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for FrictionConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 1000,
        }
    }
}

const INITIAL_GUESS: f64 = 0.01;

/// Darcy friction factor from `f = (1.14 − 2·log10(ε/D + 9.35/(Re·√f)))⁻²`.
///
/// `diameter` in m, `roughness_mm` in mm. Fixed-point iteration from 0.01
/// until successive values differ by less than the tolerance.
pub fn friction_factor(diameter: f64, reynolds: f64, roughness_mm: f64, cfg: FrictionConfig) -> f64 {
    let relative_roughness = roughness_mm / (1000.0 * diameter);
    let mut f = INITIAL_GUESS;
    for _ in 0..cfg.max_iterations {
        let term = 1.14 - 2.0 * (relative_roughness + 9.35 / (reynolds * f.sqrt())).log10();
        let next = term.powi(-2);
        if (next - f).abs() < cfg.tolerance {
            break;
        }
        f = next;
    }
    f
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_rough_limit() {
        // Re → ∞ leaves only the roughness term.
        let f = friction_factor(0.1, f64::INFINITY, 0.1, FrictionConfig::default());
        let expected = (1.14 - 2.0 * (0.001_f64).log10()).powi(-2);
        assert!((f - expected).abs() < 1e-6);
    }

    #[test]
    fn typical_turbulent_value() {
        let f = friction_factor(0.15, 2.0e6, 0.1, FrictionConfig::default());
        assert!(f > 0.01 && f < 0.03, "f = {f}");
    }

    #[test]
    fn smoother_pipe_has_lower_friction() {
        let cfg = FrictionConfig::default();
        let rough = friction_factor(0.1, 1.0e6, 0.5, cfg);
        let smooth = friction_factor(0.1, 1.0e6, 0.01, cfg);
        assert!(smooth < rough);
    }
}
