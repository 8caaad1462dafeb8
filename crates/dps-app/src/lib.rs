//! Shared application service layer for the process simulator.
//!
//! Front ends (the CLI today) go through this crate to load scenarios, build
//! and drive an [`dps_sim::Engine`], read replay files, and export traces.

pub mod clock;
pub mod error;
pub mod export;
pub mod progress;
pub mod replay_io;
pub mod run_service;
pub mod scenario_service;

pub use clock::TickClock;
pub use error::{AppError, AppResult};
pub use export::{TraceRecord, history_csv, history_json, trace_records, write_csv, write_json};
pub use progress::{RunProgressEvent, RunStage};
pub use replay_io::{load_replay_file, read_replay_file};
pub use run_service::{RunOptions, RunResponse, RunSummary, run_scenario, run_scenario_file};
pub use scenario_service::{apply_action, build_engine, field_for, load_scenario};
