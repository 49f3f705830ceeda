//! Error types for component construction.

use gn_core::error::GnError;
use thiserror::Error;

/// Errors raised when a component is built from non-physical data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Pipe '{pipe}' has no straight section")]
    MissingStraightSection { pipe: String },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for GnError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::NonPhysical { what } => GnError::InvalidArg { what },
            ComponentError::InvalidArg { what } => GnError::InvalidArg { what },
            ComponentError::MissingStraightSection { .. } => GnError::InvalidArg {
                what: "pipe without straight section",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ComponentError::MissingStraightSection { pipe: "P-7".into() };
        assert!(err.to_string().contains("P-7"));
    }

    #[test]
    fn error_conversion() {
        let comp_err = ComponentError::InvalidArg { what: "test" };
        let gn_err: GnError = comp_err.into();
        assert!(matches!(gn_err, GnError::InvalidArg { .. }));
    }
}
