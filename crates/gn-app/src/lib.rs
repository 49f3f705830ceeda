//! Shared application service layer for gasnet.
//!
//! Compiles network documents into solver inputs and runs steady
//! calculations or pressure optimizations for the CLI.

pub mod compile;
pub mod error;
pub mod run_service;

pub use compile::{CompiledNetwork, compile_network};
pub use error::{AppError, AppResult};
pub use run_service::{
    OptimizationSummary, RunMode, RunReport, StationSetpoint, optimizer_config, run_optimize,
    run_static, write_report,
};
