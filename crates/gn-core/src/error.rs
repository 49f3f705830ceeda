use thiserror::Error;

pub type GnResult<T> = Result<T, GnError>;

#[derive(Error, Debug)]
pub enum GnError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
