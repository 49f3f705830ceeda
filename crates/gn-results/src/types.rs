//! Report data types.

use serde::{Deserialize, Serialize};

use crate::ResultsResult;

/// Per-entity results and system aggregates of one solved network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkReport {
    pub stations: Vec<StationReport>,
    pub users: Vec<UserReport>,
    pub pipes: Vec<PipeReport>,
    pub fittings: Vec<FittingReport>,
    pub junctions: Vec<JunctionReport>,
    pub system: SystemReport,
}

impl NetworkReport {
    pub fn to_json_pretty(&self) -> ResultsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn station(&self, id: &str) -> Option<&StationReport> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn user(&self, id: &str) -> Option<&UserReport> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn pipe(&self, id: &str) -> Option<&PipeReport> {
        self.pipes.iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReport {
    pub id: String,
    pub p_pa: f64,
    /// Net flow leaving through the outlet edge.
    pub flow_m3_min: f64,
    pub open_count: usize,
    /// False when the station lacks units for its flow.
    pub split_solved: bool,
    pub wasted_flow_m3_min: f64,
    /// Power at net plus wasted flow.
    pub gross_power_kw: f64,
    pub compressors: Vec<CompressorReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressorReport {
    pub index: usize,
    pub degree: f64,
    pub flow_m3_min: f64,
    pub power_kw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReport {
    pub id: String,
    pub p_pa: f64,
    pub flow_m3_min: f64,
    pub min_p_pa: f64,
    pub satisfied: bool,
}

/// Pipe state; end A is the edge's `from` node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeReport {
    pub id: String,
    pub p_a_pa: f64,
    pub p_b_pa: f64,
    pub delta_p_pa: f64,
    pub p_mean_pa: f64,
    /// Signed along `from → to`.
    pub flow_m3_min: f64,
    pub efficiency: f64,
}

/// Plain valve, reducer or special valve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingReport {
    pub id: String,
    pub kind: String,
    pub node: String,
    pub edge: String,
    pub p_pa: f64,
    pub flow_m3_min: f64,
}

/// Node that is neither a station nor a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JunctionReport {
    pub id: String,
    pub p_pa: f64,
    pub edges: Vec<EdgeFlow>,
}

/// Flow on one incident edge, positive into the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeFlow {
    pub edge: String,
    pub flow_m3_min: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemReport {
    /// Delivered over supplied exergy at net station flow.
    pub net_efficiency: f64,
    /// Delivered over supplied exergy at gross station flow.
    pub total_efficiency: f64,
    pub total_power_kw: f64,
    pub supplied_flow_m3_min: f64,
    pub delivered_flow_m3_min: f64,
}
