use thiserror::Error;

use crate::network::divergence::{DivergenceWarning, FatalNumericError};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

#[derive(Error, Debug)]
pub enum NetworkError {
    /// A vector or matrix does not have the size the network was built with.
    #[error("shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A NaN appeared in a forward-pass sum.
    #[error("{0}")]
    FatalNumeric(Box<FatalNumericError>),

    /// Raised instead of a warning when the divergence policy is `Abort`.
    #[error("training diverged: {0}")]
    Diverged(DivergenceWarning),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document could not be parsed.
    #[error("malformed network document: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode network document: {0}")]
    Encode(#[source] serde_json::Error),

    /// JSON has no representation for NaN or infinity.
    #[error("cannot export non-finite values in `{field}`")]
    NonFiniteState { field: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl NetworkError {
    pub(crate) fn shape(what: &'static str, expected: usize, actual: usize) -> Self {
        NetworkError::ShapeMismatch { what, expected, actual }
    }
}

impl From<FatalNumericError> for NetworkError {
    fn from(err: FatalNumericError) -> Self {
        NetworkError::FatalNumeric(Box::new(err))
    }
}
