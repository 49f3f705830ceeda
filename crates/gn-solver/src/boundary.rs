//! Per-request boundary values.

use gn_core::units::{Pressure, VolumeRate, raw};

use crate::error::{SolverError, SolverResult};
use crate::network::Network;

/// Station outlet pressures and user withdrawals for one solve.
///
/// Indexed like `Network::sources()` and `Network::sinks()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    /// Absolute outlet pressure per station, Pa.
    pub station_pressures: Vec<f64>,
    /// Withdrawal per user, m³/min.
    pub demands: Vec<f64>,
}

impl Boundary {
    pub fn new(station_pressures: Vec<f64>, demands: Vec<f64>) -> Self {
        Self {
            station_pressures,
            demands,
        }
    }

    /// Boundary with the network's own user demands.
    pub fn with_default_demands(network: &Network, station_pressures: Vec<f64>) -> Self {
        let demands = network.sinks().iter().map(|s| s.user.demand).collect();
        Self::new(station_pressures, demands)
    }

    pub fn set_station_pressure(&mut self, station: usize, pressure: Pressure) -> SolverResult<()> {
        let len = self.station_pressures.len();
        let slot = self
            .station_pressures
            .get_mut(station)
            .ok_or_else(|| SolverError::setup(format!("station {station} of {len}")))?;
        *slot = raw::pa(pressure);
        Ok(())
    }

    pub fn set_demand(&mut self, user: usize, demand: VolumeRate) -> SolverResult<()> {
        let len = self.demands.len();
        let slot = self
            .demands
            .get_mut(user)
            .ok_or_else(|| SolverError::setup(format!("user {user} of {len}")))?;
        *slot = raw::m3pmin(demand);
        Ok(())
    }

    /// Highest station pressure; the reference all drops are measured from.
    pub fn base_pressure(&self) -> f64 {
        self.station_pressures
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Reject boundaries that do not fit `network`.
    pub fn validate(&self, network: &Network) -> SolverResult<()> {
        if network.sources().is_empty() {
            return Err(SolverError::setup("network has no compressor station"));
        }
        if self.station_pressures.len() != network.sources().len() {
            return Err(SolverError::setup(format!(
                "{} station pressures for {} stations",
                self.station_pressures.len(),
                network.sources().len()
            )));
        }
        if self.demands.len() != network.sinks().len() {
            return Err(SolverError::setup(format!(
                "{} demands for {} users",
                self.demands.len(),
                network.sinks().len()
            )));
        }
        if let Some(p) = self
            .station_pressures
            .iter()
            .find(|p| !p.is_finite() || **p <= 0.0)
        {
            return Err(SolverError::setup(format!("station pressure {p} Pa")));
        }
        if let Some(q) = self.demands.iter().find(|q| !q.is_finite() || **q < 0.0) {
            return Err(SolverError::setup(format!("user demand {q} m³/min")));
        }
        Ok(())
    }
}
