//! Fluid property errors.

use gn_core::GnError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during fluid property lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Fluid code outside the catalogue.
    #[error("Unknown fluid code {code}")]
    UnknownFluid { code: u32 },

    /// Non-physical values (non-positive temperature, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },
}

impl From<FluidError> for GnError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::UnknownFluid { .. } => GnError::InvalidArg {
                what: "unknown fluid code",
            },
            FluidError::NonPhysical { what } => GnError::InvalidArg { what },
        }
    }
}
