//! gn-project: network document format, validation and load/save.

pub mod overrides;
pub mod schema;
pub mod validate;

pub use overrides::apply_demand_overrides;
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_network};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown document format: {path}")]
    UnknownFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<NetworkDoc> {
    let content = std::fs::read_to_string(path)?;
    let doc: NetworkDoc = serde_yaml::from_str(&content)?;
    validate_network(&doc)?;
    Ok(doc)
}

pub fn save_yaml(path: &std::path::Path, doc: &NetworkDoc) -> ProjectResult<()> {
    validate_network(doc)?;
    let content = serde_yaml::to_string(doc)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<NetworkDoc> {
    let content = std::fs::read_to_string(path)?;
    let doc: NetworkDoc = serde_json::from_str(&content)?;
    validate_network(&doc)?;
    Ok(doc)
}

pub fn save_json(path: &std::path::Path, doc: &NetworkDoc) -> ProjectResult<()> {
    validate_network(doc)?;
    let content = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.yaml`/`.yml` or `.json`.
pub fn load(path: &std::path::Path) -> ProjectResult<NetworkDoc> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => load_yaml(path),
        Some("json") => load_json(path),
        _ => Err(ProjectError::UnknownFormat {
            path: path.display().to_string(),
        }),
    }
}
