//! Discrete-time simulation engine for a first-order-plus-dead-time process.
//!
//! Provides:
//! - Zero-order-hold discretization with whole-sample dead time
//! - Constant-step and file-replay input sources, deterministic disturbance step
//! - Dead-time-aware two-tap process recurrence with append-only histories
//! - Armed/idle tick gate with per-tick validation of raw operator entries
//! - [`Engine`], the single owner of all run state, advanced by [`Engine::tick`]

pub mod discretize;
pub mod engine;
pub mod error;
pub mod gate;
pub mod params;
pub mod process;
pub mod replay;
pub mod source;

// Internal modules
mod validate;

// Re-exports for public API
pub use discretize::{DiscreteCoefficients, discretize};
pub use engine::{BlockReason, ControllerDisplay, Engine, Frame, Modes, TickOutcome, TickReport};
pub use error::{SimError, SimResult, ValidationError};
pub use gate::{GateEvent, GateState, TickGate};
pub use params::{Entries, Field, ParameterSet};
pub use process::{History, ProcessSimulator};
pub use replay::parse_replay_text;
pub use source::{InputMode, InputSample, InputSource, NoiseSource, ReplaySequence, ZERO_STEP_FLOOR};
