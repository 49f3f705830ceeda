//! Compressor stations: valve split across identical units and power model.

use gn_core::units::{Pressure, VolumeRate, raw};
use serde::{Deserialize, Serialize};

use crate::common::check_positive;
use crate::error::{ComponentError, ComponentResult};

/// Wasted flow below this magnitude (m³/min) is reported as zero.
const WASTE_DEADBAND: f64 = 0.1;

/// Floor applied when the linear model yields a non-positive power, kW.
const POWER_FLOOR_KW: f64 = 10.0;

/// Linear station power model `c1·p·1e-5 + c2·Q + c3` in kW (p in Pa, Q in m³/min).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerModel {
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
}

impl PowerModel {
    pub const AS_1: PowerModel = PowerModel {
        c1: 51.7,
        c2: 5.5833,
        c3: -312.37,
    };
    pub const AS_2: PowerModel = PowerModel {
        c1: 51.5,
        c2: 5.6867,
        c3: -264.2,
    };
    pub const AS_3: PowerModel = PowerModel {
        c1: 34.3,
        c2: 5.93,
        c3: -238.0,
    };

    /// Built-in coefficients by station id; unknown ids use `AS_1`.
    pub fn for_station(id: &str) -> Self {
        match id {
            "AS-2" => Self::AS_2,
            "AS-3" => Self::AS_3,
            _ => Self::AS_1,
        }
    }

    /// Power in kW; zero without flow, floored at 10 kW otherwise.
    pub fn power(&self, pressure_pa: f64, flow: f64) -> f64 {
        if flow <= 0.0 {
            return 0.0;
        }
        let p = self.c1 * pressure_pa * 1e-5 + self.c2 * flow + self.c3;
        if p <= 0.0 { POWER_FLOOR_KW } else { p }
    }
}

/// Assignment of valve degrees to a station's compressors.
#[derive(Clone, Debug, PartialEq)]
pub enum ValveSplit {
    Solved {
        /// One degree per compressor, 0 for closed units.
        degrees: Vec<f64>,
        open_count: usize,
        realized_flow: f64,
        wasted_flow: f64,
    },
    /// More units are needed than the station has.
    Unsolvable { required: usize, available: usize },
}

impl ValveSplit {
    pub fn is_solvable(&self) -> bool {
        matches!(self, ValveSplit::Solved { .. })
    }

    pub fn open_count(&self) -> usize {
        match self {
            ValveSplit::Solved { open_count, .. } => *open_count,
            ValveSplit::Unsolvable { .. } => 0,
        }
    }

    pub fn wasted_flow(&self) -> f64 {
        match self {
            ValveSplit::Solved { wasted_flow, .. } => *wasted_flow,
            ValveSplit::Unsolvable { .. } => 0.0,
        }
    }

    /// Degrees for `count` units; all zero when unsolvable.
    pub fn degrees(&self, count: usize) -> Vec<f64> {
        match self {
            ValveSplit::Solved { degrees, .. } => degrees.clone(),
            ValveSplit::Unsolvable { .. } => vec![0.0; count],
        }
    }
}

/// Split `target` m³/min over `count` identical units of `max_flow` with
/// minimum open fraction `min_degree`.
///
/// Opens `ceil(target/max_flow)` units. Tries "k units fully open, the rest
/// sharing the remainder" for k = 1, 2, … and takes the first whose shared
/// degree reaches `min_degree`. When none does, the last unit sits at
/// `min_degree`.
pub fn split_valves(count: usize, max_flow: f64, min_degree: f64, target: f64) -> ValveSplit {
    let open = if target > 0.0 {
        (target / max_flow).ceil() as usize
    } else {
        0
    };
    if open > count {
        return ValveSplit::Unsolvable {
            required: open,
            available: count,
        };
    }

    let mut degrees = vec![0.0; count];
    if open > 0 {
        let average = target / open as f64 / max_flow;
        if average < min_degree {
            degrees[..open].fill(min_degree);
        } else if open == 1 {
            degrees[0] = average.min(1.0);
        } else {
            for full in 1..open {
                degrees[..full].fill(1.0);
                let shared = open - full;
                let degree = (target - full as f64 * max_flow) / (shared as f64 * max_flow);
                if full == open - 1 {
                    degrees[full] = min_degree;
                }
                if degree >= min_degree {
                    degrees[open - shared..open].fill(degree.min(1.0));
                    break;
                }
            }
        }
    }

    let realized_flow: f64 = degrees.iter().map(|d| d * max_flow).sum();
    let mut wasted_flow = realized_flow - target;
    if open == 0 || wasted_flow.abs() < WASTE_DEADBAND {
        wasted_flow = 0.0;
    }

    ValveSplit::Solved {
        degrees,
        open_count: open,
        realized_flow,
        wasted_flow,
    }
}

/// Source node: a set of identical compressors behind one outlet.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressorStation {
    name: String,
    pub compressor_count: usize,
    /// Per-unit capacity, m³/min.
    pub max_flow: f64,
    /// Minimum open fraction of a running unit (0..=1).
    pub min_degree: f64,
    pub power: PowerModel,
}

impl CompressorStation {
    pub fn new(
        name: impl Into<String>,
        compressor_count: usize,
        max_flow: VolumeRate,
        min_degree: f64,
    ) -> ComponentResult<Self> {
        let name = name.into();
        if compressor_count == 0 {
            return Err(ComponentError::InvalidArg {
                what: "station without compressors",
            });
        }
        let max_flow = check_positive(raw::m3pmin(max_flow), "compressor max flow")?;
        if !(0.0..=1.0).contains(&min_degree) {
            return Err(ComponentError::NonPhysical {
                what: "compressor minimum degree",
            });
        }
        let power = PowerModel::for_station(&name);
        Ok(Self {
            name,
            compressor_count,
            max_flow,
            min_degree,
            power,
        })
    }

    /// Override the built-in power coefficients.
    pub fn with_power_model(mut self, power: PowerModel) -> Self {
        self.power = power;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total capacity, m³/min.
    pub fn capacity(&self) -> f64 {
        self.compressor_count as f64 * self.max_flow
    }

    pub fn split(&self, target: f64) -> ValveSplit {
        split_valves(self.compressor_count, self.max_flow, self.min_degree, target)
    }

    /// Station power in kW at `pressure` for `flow` m³/min.
    pub fn power_at(&self, pressure: Pressure, flow: f64) -> f64 {
        self.power.power(raw::pa(pressure), flow)
    }
}
