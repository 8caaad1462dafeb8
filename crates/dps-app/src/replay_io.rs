//! Reading replay files from disk.
//!
//! All file access happens here, outside the tick. The engine only ever sees
//! a fully parsed sample vector.

use std::path::Path;

use dps_sim::{Engine, parse_replay_text};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Read and parse a replay file.
pub fn read_replay_file(path: &Path) -> AppResult<Vec<f64>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "replay file unreadable");
        AppError::ReplayFileRead {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    let samples = parse_replay_text(&text).map_err(|e| {
        warn!(path = %path.display(), error = %e, "replay file rejected");
        AppError::Replay {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    info!(path = %path.display(), samples = samples.len(), "replay file read");
    Ok(samples)
}

/// Read a replay file and hand it to the engine. On any failure the engine
/// keeps its current replay sequence.
pub fn load_replay_file(engine: &mut Engine, path: &Path) -> AppResult<usize> {
    let samples = read_replay_file(path)?;
    let count = samples.len();
    engine.load_replay(samples)?;
    Ok(count)
}
