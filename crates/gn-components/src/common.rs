//! Gas-state relations shared by every edge.

use std::f64::consts::PI;

use gn_core::units::constants::{P_REF_PA, SECONDS_PER_MINUTE, T_NORMAL_K};

use crate::error::{ComponentError, ComponentResult};

/// m³/min at reference density → kg/s.
#[inline]
pub fn volumetric_to_mass(q_m3pmin: f64, rho0: f64) -> f64 {
    rho0 * q_m3pmin / SECONDS_PER_MINUTE
}

/// kg/s → m³/min at reference density.
#[inline]
pub fn mass_to_volumetric(mdot: f64, rho0: f64) -> f64 {
    mdot * SECONDS_PER_MINUTE / rho0
}

/// In-pipe density from reference density, temperature (K) and absolute pressure (Pa).
#[inline]
pub fn gas_density(rho0: f64, t_k: f64, p_abs: f64) -> f64 {
    rho0 * (T_NORMAL_K / t_k) * (p_abs / P_REF_PA)
}

/// Mean velocity (m/s) of a mass flow through a circular bore.
#[inline]
pub fn velocity(mdot: f64, diameter: f64, density: f64) -> f64 {
    (4.0 * mdot / (PI * diameter * diameter * density)).abs()
}

/// Reynolds number with viscosity in μPa·s; infinite when viscosity is zero.
#[inline]
pub fn reynolds(velocity: f64, diameter: f64, density: f64, mu_upas: f64) -> f64 {
    if mu_upas == 0.0 {
        return f64::INFINITY;
    }
    velocity * diameter * density * 1.0e6 / mu_upas
}

/// Reject non-finite or non-positive lengths.
pub(crate) fn check_positive(value: f64, what: &'static str) -> ComponentResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ComponentError::NonPhysical { what })
    }
}
