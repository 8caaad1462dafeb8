//! Discrete feedback control for the dynamic process simulator.
//!
//! The controller closes the loop around the simulated FOPDT process. It is a
//! textbook difference-equation PID in incremental (velocity) form:
//!
//! ```text
//! m[k] = u[k] + q0*e[k] + q1*e[k-1] + q2*e[k-2]
//! ```
//!
//! where `u[k]` is the process input that produced the latest measurement and
//! `q0..q2` are derived from the controller gains and the sample period.
//!
//! # Architecture
//!
//! - [`PidGains`] holds the operator-facing tuning (`kc`, `Ti`, `Td`)
//! - [`PidCoefficients`] is the sampled form, recomputed every tick
//! - [`PidState`] carries the three-sample error history and the last output
//! - [`PidController`] owns the state and applies one update per accepted tick
//! - [`ControlMode`] selects manual (set point tracks the output) or automatic

pub mod controller;
pub mod error;

pub use controller::{
    ControlMode, PidCoefficients, PidController, PidGains, PidState, SetPoint,
};
pub use error::{ControlError, ControlResult};
