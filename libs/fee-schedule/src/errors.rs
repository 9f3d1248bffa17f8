//! Error types for fee calculation
//!
//! Error taxonomy using thiserror

use thiserror::Error;

/// Result alias used throughout the crate
pub type FeeResult<T> = Result<T, FeeError>;

/// Top-level fee error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeeError {
    /// A setter or operation received a value outside its domain.
    #[error("Invalid {parameter}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    /// Arithmetic left the range of minor units.
    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },

    /// A serialized fee schedule could not be parsed.
    #[error("Invalid fee schedule config: {0}")]
    Config(String),
}

impl FeeError {
    /// Name of the rejected parameter, if this is a validation failure.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            FeeError::InvalidParameter { parameter, .. } => Some(*parameter),
            _ => None,
        }
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, FeeError::InvalidParameter { .. })
    }
}

impl From<serde_json::Error> for FeeError {
    fn from(err: serde_json::Error) -> Self {
        FeeError::Config(err.to_string())
    }
}
