//! Error types for the gn-app service layer.

use std::path::PathBuf;

/// Application error wrapping the backend crates' errors for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Network compilation failed: {0}")]
    Compile(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Optimizer error: {0}")]
    Optimizer(String),

    #[error("Failed to write report: {path}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Network '{network}' has no feasible operating point")]
    Infeasible { network: String },
}

/// Result type for gn-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<gn_project::ProjectError> for AppError {
    fn from(err: gn_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<gn_project::ValidationError> for AppError {
    fn from(err: gn_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<gn_graph::GraphError> for AppError {
    fn from(err: gn_graph::GraphError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<gn_fluids::FluidError> for AppError {
    fn from(err: gn_fluids::FluidError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<gn_components::ComponentError> for AppError {
    fn from(err: gn_components::ComponentError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<gn_solver::SolverError> for AppError {
    fn from(err: gn_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<gn_results::ResultsError> for AppError {
    fn from(err: gn_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}

impl From<gn_optimizer::OptimizerError> for AppError {
    fn from(err: gn_optimizer::OptimizerError) -> Self {
        AppError::Optimizer(err.to_string())
    }
}
