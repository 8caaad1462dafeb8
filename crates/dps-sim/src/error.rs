//! Error types for simulation operations.

use crate::params::Field;
use dps_controls::ControlError;
use dps_core::DpsError;
use thiserror::Error;

/// Errors returned by engine operations outside the tick boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Replay line {line}: {token:?} is not a number")]
    ReplayParse { line: usize, token: String },

    #[error("Replay resource contains no samples")]
    ReplayEmpty,
}

pub type SimResult<T> = Result<T, SimError>;

impl From<DpsError> for SimError {
    fn from(e: DpsError) -> Self {
        match e {
            DpsError::NonFinite { what, value } => SimError::NonFinite { what, value },
            DpsError::InvalidArg { what }
            | DpsError::NotANumber { what, .. }
            | DpsError::Empty { what } => SimError::InvalidArg { what },
        }
    }
}

/// Reasons a tick fails per-tick validation.
///
/// These never escape [`crate::Engine::tick`] as errors; they are reported
/// inside [`crate::TickOutcome::Blocked`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} entry rejected: {source}")]
    ParameterInvalid { field: Field, source: DpsError },

    #[error("Controller tuning rejected: {0}")]
    ControllerInvalid(#[from] ControlError),

    #[error("No replay samples loaded")]
    InputSourceEmpty,

    #[error("Mode conflict: {what}")]
    ModeConflict { what: &'static str },
}
