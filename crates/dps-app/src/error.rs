//! Error types for the dps-app service layer.

use std::path::PathBuf;

/// Unified error for the CLI and any other front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read replay file: {path}")]
    ReplayFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Replay file {path} rejected: {source}")]
    Replay {
        path: PathBuf,
        source: dps_sim::SimError,
    },

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dps-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<dps_project::ScenarioError> for AppError {
    fn from(err: dps_project::ScenarioError) -> Self {
        match err {
            dps_project::ScenarioError::Io(e) => AppError::Io(e),
            other => AppError::Scenario(other.to_string()),
        }
    }
}

impl From<dps_project::ValidationError> for AppError {
    fn from(err: dps_project::ValidationError) -> Self {
        AppError::Scenario(err.to_string())
    }
}

impl From<dps_sim::SimError> for AppError {
    fn from(err: dps_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Export(err.to_string())
    }
}
