//! Document validation.

use std::collections::{HashMap, HashSet};

use gn_fluids::Fluid;

use crate::schema::{NetworkDoc, NodeKind, PipeDef};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Node '{id}' is a {actual:?}, expected {expected:?}")]
    WrongNodeKind {
        id: String,
        expected: NodeKind,
        actual: NodeKind,
    },

    #[error("Pipe '{pipe}' does not touch node '{node}'")]
    Detached { pipe: String, node: String },

    #[error("Network has no compressor station")]
    NoStation,

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub const LATEST_VERSION: u32 = 1;

type VResult = Result<(), ValidationError>;

fn invalid(field: String, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: impl FnOnce() -> String, value: f64) -> VResult {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field(), value, "must be positive and finite"))
    }
}

fn non_negative(field: impl FnOnce() -> String, value: f64) -> VResult {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field(), value, "must be non-negative and finite"))
    }
}

pub fn validate_network(doc: &NetworkDoc) -> VResult {
    if doc.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: doc.version,
        });
    }
    if Fluid::from_code(doc.fluid.code).is_err() {
        return Err(invalid(
            "fluid code".to_string(),
            f64::from(doc.fluid.code),
            "unknown fluid",
        ));
    }
    let t = doc.fluid.temperature_c;
    if !t.is_finite() || t <= -273.15 {
        return Err(invalid(
            "fluid temperature_c".to_string(),
            t,
            "must be above absolute zero",
        ));
    }

    let mut kinds: HashMap<&str, NodeKind> = HashMap::new();
    for node in &doc.nodes {
        if kinds.insert(&node.id, node.kind).is_some() {
            return Err(ValidationError::DuplicateId {
                id: node.id.clone(),
                context: "nodes".to_string(),
            });
        }
    }

    let mut pipes: HashMap<&str, &PipeDef> = HashMap::new();
    for pipe in &doc.pipes {
        if pipes.insert(&pipe.id, pipe).is_some() {
            return Err(ValidationError::DuplicateId {
                id: pipe.id.clone(),
                context: "pipes".to_string(),
            });
        }
        validate_pipe(pipe, &kinds)?;
    }

    let attach = Attachments {
        kinds: &kinds,
        pipes: &pipes,
    };
    let mut fitting_nodes = HashSet::new();
    let mut claim = |id: &str, context: &str| -> VResult {
        if fitting_nodes.insert(id.to_string()) {
            Ok(())
        } else {
            Err(ValidationError::DuplicateId {
                id: id.to_string(),
                context: context.to_string(),
            })
        }
    };

    for v in &doc.valves {
        claim(&v.id, "fittings")?;
        attach.check(&v.id, &v.pipe, NodeKind::Fitting)?;
        positive(|| format!("valve '{}' diameter_mm", v.id), v.diameter_mm)?;
    }
    for r in &doc.reducers {
        claim(&r.id, "fittings")?;
        attach.check(&r.id, &r.pipe, NodeKind::Fitting)?;
        positive(|| format!("reducer '{}' inlet_mm", r.id), r.inlet_mm)?;
        positive(|| format!("reducer '{}' outlet_mm", r.id), r.outlet_mm)?;
        if !(r.angle_deg > 0.0 && r.angle_deg < 90.0) {
            return Err(invalid(
                format!("reducer '{}' angle_deg", r.id),
                r.angle_deg,
                "must lie strictly between 0 and 90",
            ));
        }
    }
    for v in &doc.limit_flow_valves {
        claim(&v.id, "fittings")?;
        attach.check(&v.id, &v.pipe, NodeKind::Fitting)?;
        positive(|| format!("limit-flow valve '{}' set_flow_m3_min", v.id), v.set_flow_m3_min)?;
    }
    for v in &doc.limit_drop_valves {
        claim(&v.id, "fittings")?;
        attach.check(&v.id, &v.pipe, NodeKind::Fitting)?;
        non_negative(|| format!("limit-drop valve '{}' set_drop_kpa", v.id), v.set_drop_kpa)?;
    }
    for v in &doc.limit_pressure_valves {
        claim(&v.id, "fittings")?;
        attach.check(&v.id, &v.pipe, NodeKind::Fitting)?;
        positive(
            || format!("limit-pressure valve '{}' set_pressure_kpa", v.id),
            v.set_pressure_kpa,
        )?;
    }

    let mut users = HashSet::new();
    for u in &doc.users {
        if !users.insert(u.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: u.id.clone(),
                context: "users".to_string(),
            });
        }
        attach.check(&u.id, &u.pipe, NodeKind::User)?;
        non_negative(|| format!("user '{}' demand_m3_min", u.id), u.demand_m3_min)?;
        positive(|| format!("user '{}' min_pressure_kpa", u.id), u.min_pressure_kpa)?;
    }

    let mut stations = HashSet::new();
    for s in &doc.stations {
        if !stations.insert(s.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: s.id.clone(),
                context: "stations".to_string(),
            });
        }
        attach.check(&s.id, &s.pipe, NodeKind::Station)?;
        positive(|| format!("station '{}' pressure_kpa", s.id), s.pressure_kpa)?;
        if s.compressors.count == 0 {
            return Err(invalid(
                format!("station '{}' compressors.count", s.id),
                0.0,
                "needs at least one compressor",
            ));
        }
        positive(
            || format!("station '{}' compressors.max_flow_m3_min", s.id),
            s.compressors.max_flow_m3_min,
        )?;
        let d = s.compressors.min_degree_pct;
        if !(0.0..=100.0).contains(&d) {
            return Err(invalid(
                format!("station '{}' compressors.min_degree_pct", s.id),
                d,
                "must lie in 0..=100",
            ));
        }
    }
    if doc.stations.is_empty() {
        return Err(ValidationError::NoStation);
    }

    // Every user or station node needs its entry.
    for node in &doc.nodes {
        let listed = match node.kind {
            NodeKind::User => users.contains(node.id.as_str()),
            NodeKind::Station => stations.contains(node.id.as_str()),
            NodeKind::Tee | NodeKind::Fitting => true,
        };
        if !listed {
            return Err(ValidationError::MissingReference {
                id: node.id.clone(),
                context: format!("{:?} entries", node.kind).to_lowercase(),
            });
        }
    }

    if let Some(opt) = &doc.optimizer {
        if opt.population_size == Some(0) {
            return Err(invalid(
                "optimizer population_size".to_string(),
                0.0,
                "must be positive",
            ));
        }
        if opt.max_generations == Some(0) {
            return Err(invalid(
                "optimizer max_generations".to_string(),
                0.0,
                "must be positive",
            ));
        }
        if let Some(step) = opt.step_kpa {
            positive(|| "optimizer step_kpa".to_string(), step)?;
        }
    }

    Ok(())
}

fn validate_pipe(pipe: &PipeDef, kinds: &HashMap<&str, NodeKind>) -> VResult {
    for end in [&pipe.from, &pipe.to] {
        if !kinds.contains_key(end.as_str()) {
            return Err(ValidationError::MissingReference {
                id: end.clone(),
                context: format!("pipe '{}' endpoints", pipe.id),
            });
        }
    }
    if pipe.from == pipe.to {
        return Err(ValidationError::InvalidValue {
            field: format!("pipe '{}' endpoints", pipe.id),
            value: pipe.from.clone(),
            reason: "a pipe needs two distinct nodes".to_string(),
        });
    }
    if pipe.direction != 1 && pipe.direction != -1 {
        return Err(invalid(
            format!("pipe '{}' direction", pipe.id),
            f64::from(pipe.direction),
            "must be 1 or -1",
        ));
    }
    if pipe.sections.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("pipe '{}' sections", pipe.id),
            value: "[]".to_string(),
            reason: "needs at least one straight section".to_string(),
        });
    }
    for (i, s) in pipe.sections.iter().enumerate() {
        positive(|| format!("pipe '{}' section {i} length_m", pipe.id), s.length_m)?;
        positive(|| format!("pipe '{}' section {i} diameter_mm", pipe.id), s.diameter_mm)?;
        non_negative(|| format!("pipe '{}' section {i} roughness_mm", pipe.id), s.roughness_mm)?;
    }
    for (i, b) in pipe.bends.iter().enumerate() {
        if !(b.angle_deg > 0.0 && b.angle_deg <= 180.0) {
            return Err(invalid(
                format!("pipe '{}' bend {i} angle_deg", pipe.id),
                b.angle_deg,
                "must lie in (0, 180]",
            ));
        }
        positive(|| format!("pipe '{}' bend {i} radius_ratio", pipe.id), b.radius_ratio)?;
    }
    Ok(())
}

struct Attachments<'a> {
    kinds: &'a HashMap<&'a str, NodeKind>,
    pipes: &'a HashMap<&'a str, &'a PipeDef>,
}

impl Attachments<'_> {
    /// `node` exists with `expected` kind and `pipe` ends at it.
    fn check(&self, node: &str, pipe: &str, expected: NodeKind) -> VResult {
        let Some(&actual) = self.kinds.get(node) else {
            return Err(ValidationError::MissingReference {
                id: node.to_string(),
                context: "nodes".to_string(),
            });
        };
        if actual != expected {
            return Err(ValidationError::WrongNodeKind {
                id: node.to_string(),
                expected,
                actual,
            });
        }
        let Some(p) = self.pipes.get(pipe) else {
            return Err(ValidationError::MissingReference {
                id: pipe.to_string(),
                context: format!("attachment of '{node}'"),
            });
        };
        if p.from != node && p.to != node {
            return Err(ValidationError::Detached {
                pipe: pipe.to_string(),
                node: node.to_string(),
            });
        }
        Ok(())
    }
}
