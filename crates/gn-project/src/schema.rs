//! Network document schema.
//!
//! Units follow the plant's conventions: pressures in kPa (absolute),
//! diameters and roughness in mm, lengths in m, flows in m³/min at
//! reference density, temperatures in °C and compressor degrees in %.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkDoc {
    pub version: u32,
    pub name: String,
    pub fluid: FluidDef,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub pipes: Vec<PipeDef>,
    #[serde(default)]
    pub valves: Vec<ValveDef>,
    #[serde(default)]
    pub reducers: Vec<ReducerDef>,
    #[serde(default)]
    pub limit_flow_valves: Vec<LimitFlowDef>,
    #[serde(default)]
    pub limit_drop_valves: Vec<LimitDropDef>,
    #[serde(default)]
    pub limit_pressure_valves: Vec<LimitPressureDef>,
    #[serde(default)]
    pub users: Vec<UserDef>,
    #[serde(default)]
    pub stations: Vec<StationDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizer: Option<OptimizerDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FluidDef {
    /// Catalogue code, 1 = compressed air.
    pub code: u32,
    pub temperature_c: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum NodeKind {
    Tee,
    Fitting,
    User,
    Station,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipeDef {
    pub id: String,
    pub from: String,
    pub to: String,
    /// `1` keeps `from → to` as the positive flow direction, `-1` reverses it.
    #[serde(default = "default_direction")]
    pub direction: i8,
    pub sections: Vec<SectionDef>,
    #[serde(default)]
    pub bends: Vec<BendDef>,
}

impl PipeDef {
    /// Endpoints in positive flow order.
    pub fn oriented(&self) -> (&str, &str) {
        if self.direction < 0 {
            (&self.to, &self.from)
        } else {
            (&self.from, &self.to)
        }
    }
}

fn default_direction() -> i8 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionDef {
    pub length_m: f64,
    pub diameter_mm: f64,
    #[serde(default = "default_roughness_mm")]
    pub roughness_mm: f64,
}

fn default_roughness_mm() -> f64 {
    0.1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BendDef {
    pub count: u32,
    pub angle_deg: f64,
    /// Bend radius over pipe bore.
    #[serde(default = "default_radius_ratio")]
    pub radius_ratio: f64,
}

fn default_radius_ratio() -> f64 {
    1.5
}

/// Plain (gate) valve sitting on fitting node `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValveDef {
    pub id: String,
    pub pipe: String,
    pub diameter_mm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReducerDef {
    pub id: String,
    pub pipe: String,
    pub inlet_mm: f64,
    pub outlet_mm: f64,
    pub angle_deg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LimitFlowDef {
    pub id: String,
    pub pipe: String,
    pub set_flow_m3_min: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LimitDropDef {
    pub id: String,
    pub pipe: String,
    pub set_drop_kpa: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LimitPressureDef {
    pub id: String,
    pub pipe: String,
    pub set_pressure_kpa: f64,
    /// Installed flow direction; carried for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_direction: Option<i8>,
}

/// Consumer on user node `id`, fed through `pipe`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserDef {
    pub id: String,
    pub pipe: String,
    pub demand_m3_min: f64,
    pub min_pressure_kpa: f64,
}

/// Compressor station on station node `id`, discharging into `pipe`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationDef {
    pub id: String,
    pub pipe: String,
    pub pressure_kpa: f64,
    pub compressors: CompressorsDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<PowerDef>,
}

/// Identical units of one station.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompressorsDef {
    pub count: u32,
    pub max_flow_m3_min: f64,
    pub min_degree_pct: f64,
}

/// Power model `c1·p[Pa]·1e-5 + c2·Q + c3`, kW.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PowerDef {
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
}

/// Optimizer overrides; absent fields keep the optimizer defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OptimizerDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_generations: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_kpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl NetworkDoc {
    pub fn node(&self, id: &str) -> Option<&NodeDef> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn pipe(&self, id: &str) -> Option<&PipeDef> {
        self.pipes.iter().find(|p| p.id == id)
    }

    pub fn user_mut(&mut self, id: &str) -> Option<&mut UserDef> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    pub fn station_mut(&mut self, id: &str) -> Option<&mut StationDef> {
        self.stations.iter_mut().find(|s| s.id == id)
    }
}
