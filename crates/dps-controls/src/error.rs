//! Error types for control system operations.

use thiserror::Error;

/// Result type for control system operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in control system operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Gains produced a non-finite sampled coefficient.
    #[error("Non-finite controller coefficient {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

impl From<dps_core::DpsError> for ControlError {
    fn from(e: dps_core::DpsError) -> Self {
        match e {
            dps_core::DpsError::NonFinite { what, value } => {
                ControlError::NonFinite { what, value }
            }
            dps_core::DpsError::InvalidArg { what }
            | dps_core::DpsError::NotANumber { what, .. }
            | dps_core::DpsError::Empty { what } => ControlError::InvalidArg { what },
        }
    }
}
