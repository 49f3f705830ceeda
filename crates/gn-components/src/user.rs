//! Users: sink nodes withdrawing gas.

use gn_core::units::{Pressure, VolumeRate, raw};

use crate::error::{ComponentError, ComponentResult};

#[derive(Clone, Debug, PartialEq)]
pub struct User {
    name: String,
    /// Withdrawal, m³/min.
    pub demand: f64,
    /// Minimum acceptable delivery pressure, Pa.
    pub min_pressure: f64,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        demand: VolumeRate,
        min_pressure: Pressure,
    ) -> ComponentResult<Self> {
        let demand = raw::m3pmin(demand);
        if !demand.is_finite() || demand < 0.0 {
            return Err(ComponentError::NonPhysical { what: "user demand" });
        }
        let min_pressure = raw::pa(min_pressure);
        if !min_pressure.is_finite() || min_pressure < 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "user minimum pressure",
            });
        }
        Ok(Self {
            name: name.into(),
            demand,
            min_pressure,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `pressure` Pa meets the minimum.
    pub fn is_satisfied(&self, pressure: f64) -> bool {
        pressure >= self.min_pressure
    }
}
