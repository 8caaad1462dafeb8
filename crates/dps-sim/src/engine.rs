//! The simulation engine: single owner of all run state.
//!
//! A scheduler (timer, event loop, test) calls [`Engine::tick`] once per
//! clock interval. Each call either advances the time index by exactly one
//! and appends one sample to every history, or changes nothing at all.
//! Operator actions (`edit`, `confirm`, mode switches, replay loads, reset)
//! happen between ticks.

use crate::discretize::{DiscreteCoefficients, discretize};
use crate::error::{SimResult, ValidationError};
use crate::gate::{GateEvent, GateState, TickGate};
use crate::params::{Entries, Field};
use crate::process::{History, ProcessSimulator};
use crate::source::{InputMode, ReplaySequence};
use crate::validate::plan_tick;
use dps_controls::{ControlMode, PidCoefficients, PidController};
use std::fmt;
use tracing::{debug, info, warn};

/// Mode selections made by the operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modes {
    pub input: InputMode,
    pub noise_enabled: bool,
    pub control: ControlMode,
}

/// Why a tick did not advance the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockReason {
    /// The gate is idle; an entry is being edited.
    GateIdle,
    /// Entries or modes failed per-tick validation.
    Invalid(ValidationError),
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::GateIdle => f.write_str("gate idle"),
            BlockReason::Invalid(e) => write!(f, "{e}"),
        }
    }
}

/// Samples produced by an accepted tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Index of the new samples.
    pub t: usize,
    pub input: f64,
    pub noise: f64,
    pub output: f64,
    /// The replay source was exhausted and repeated its last sample.
    pub hold: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Advanced(TickReport),
    Blocked(BlockReason),
}

impl TickOutcome {
    pub fn is_advanced(&self) -> bool {
        matches!(self, TickOutcome::Advanced(_))
    }
}

/// Most recent slice of the histories, for plotting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    /// Current time index.
    pub t: usize,
    /// Time index of the first sample in the slices.
    pub start: usize,
    pub input: &'a [f64],
    pub noise: &'a [f64],
    pub output: &'a [f64],
}

/// Controller values shown while in automatic mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerDisplay {
    pub coefficients: PidCoefficients,
    /// Latest error `e_k0`.
    pub error: f64,
    pub set_point: f64,
    /// Input scheduled for the next tick.
    pub manipulated: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    entries: Entries,
    modes: Modes,
    gate: TickGate,
    process: ProcessSimulator,
    replay: ReplaySequence,
    controller: PidController,
    coefficients: Option<DiscreteCoefficients>,
}

impl Engine {
    /// Fresh engine: `t = 0`, sentinel histories, idle gate, empty entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the run by one sample if the gate is armed and everything
    /// validates; otherwise leave all state untouched.
    pub fn tick(&mut self) -> TickOutcome {
        let t = self.process.next_index();

        let plan = match plan_tick(&self.entries, &self.modes, &self.replay, t) {
            Ok(plan) => plan,
            Err(e) => {
                if matches!(e, ValidationError::ModeConflict { .. }) {
                    warn!(t, error = %e, "tick blocked");
                } else {
                    debug!(t, error = %e, "tick blocked");
                }
                return TickOutcome::Blocked(BlockReason::Invalid(e));
            }
        };

        if plan.input.hold {
            self.gate.apply(GateEvent::Hold);
        }
        if !self.gate.is_armed() {
            debug!(t, "tick blocked: gate idle");
            return TickOutcome::Blocked(BlockReason::GateIdle);
        }

        let coeffs = discretize(&plan.params);
        let input = match (self.modes.control, self.controller.output()) {
            (ControlMode::Automatic, Some(m_k)) => m_k,
            _ => plan.input.value,
        };
        let noise = plan.noise.sample();

        let output = self.process.step(&coeffs, input, noise);
        self.controller
            .update(plan.coefficients, plan.set_point, output, input);
        self.coefficients = Some(coeffs);

        TickOutcome::Advanced(TickReport {
            t,
            input,
            noise,
            output,
            hold: plan.input.hold,
        })
    }

    /// Record an unconfirmed edit. Idles the gate.
    pub fn edit(&mut self, field: Field, text: impl Into<String>) {
        self.entries.set(field, text);
        self.gate.apply(GateEvent::Edit);
    }

    /// Confirm an entry. Arms the gate.
    pub fn confirm(&mut self, field: Field) {
        debug!(%field, "entry confirmed");
        self.gate.apply(GateEvent::Confirm);
    }

    /// Edit and confirm in one step.
    pub fn commit(&mut self, field: Field, text: impl Into<String>) {
        self.edit(field, text);
        self.confirm(field);
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.modes.input = mode;
    }

    pub fn set_noise_enabled(&mut self, enabled: bool) {
        self.modes.noise_enabled = enabled;
    }

    pub fn set_control_mode(&mut self, mode: ControlMode) {
        self.modes.control = mode;
    }

    /// Install replay samples that were loaded outside the tick.
    ///
    /// # Errors
    ///
    /// An empty or non-finite load is rejected and the current sequence is
    /// kept.
    pub fn load_replay(&mut self, samples: Vec<f64>) -> SimResult<()> {
        let loaded = samples.len();
        let prefix = self
            .replay
            .load(samples, self.process.history().input())?;
        info!(
            loaded,
            prefix,
            t = self.process.time_index(),
            "replay sequence loaded"
        );
        Ok(())
    }

    /// Back to the state of a fresh engine, keeping process parameters and
    /// controller tuning entries.
    pub fn reset(&mut self) {
        self.process.reset();
        self.controller.reset();
        self.replay.clear();
        self.coefficients = None;
        self.entries.set(Field::StepMagnitude, "");
        self.entries.set(Field::NoiseMagnitude, "");
        self.gate.apply(GateEvent::Reset);
        info!("simulation reset");
    }

    pub fn time_index(&self) -> usize {
        self.process.time_index()
    }

    pub fn history(&self) -> &History {
        self.process.history()
    }

    /// Up to `window` most recent samples of each plotted history.
    pub fn frame(&self, window: usize) -> Frame<'_> {
        let h = self.process.history();
        let start = h.len().saturating_sub(window);
        Frame {
            t: self.process.time_index(),
            start,
            input: &h.input()[start..],
            noise: &h.noise()[start..],
            output: &h.output()[start..],
        }
    }

    /// Coefficients used by the latest accepted tick.
    pub fn coefficients(&self) -> Option<DiscreteCoefficients> {
        self.coefficients
    }

    pub fn controller_display(&self) -> Option<ControllerDisplay> {
        if !self.modes.control.is_automatic() {
            return None;
        }
        let state = self.controller.state();
        Some(ControllerDisplay {
            coefficients: self.controller.coefficients(),
            error: state.e_k0,
            set_point: state.set_point,
            manipulated: state.manipulated,
        })
    }

    pub fn controller(&self) -> &PidController {
        &self.controller
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn replay(&self) -> &ReplaySequence {
        &self.replay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed_step_engine() -> Engine {
        let mut engine = Engine::new();
        engine.commit(Field::Gain, "2");
        engine.commit(Field::Tau, "5");
        engine.commit(Field::DeadTime, "1");
        engine.commit(Field::Period, "1");
        engine.commit(Field::StepMagnitude, "10");
        engine
    }

    #[test]
    fn fresh_engine_is_idle_with_sentinel() {
        let engine = Engine::new();
        assert_eq!(engine.time_index(), 0);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.gate_state(), GateState::Idle);
        assert_eq!(engine.coefficients(), None);
    }

    #[test]
    fn idle_gate_blocks_valid_tick() {
        let mut engine = armed_step_engine();
        engine.edit(Field::StepMagnitude, "12");
        assert_eq!(engine.tick(), TickOutcome::Blocked(BlockReason::GateIdle));
        assert_eq!(engine.time_index(), 0);

        engine.confirm(Field::StepMagnitude);
        assert!(engine.tick().is_advanced());
        assert_eq!(engine.history().input(), &[0.0, 12.0]);
    }

    #[test]
    fn step_scenario_matches_hand_computation() {
        let mut engine = armed_step_engine();
        assert!(engine.tick().is_advanced());
        assert!(engine.tick().is_advanced());

        let out = engine.history().output();
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 0.0);
        assert!((out[2] - 3.625).abs() < 1e-3);

        let c = engine.coefficients().unwrap();
        assert_eq!(c.delay, 1);
    }

    #[test]
    fn frame_windows_recent_samples() {
        let mut engine = armed_step_engine();
        for _ in 0..10 {
            engine.tick();
        }
        let frame = engine.frame(4);
        assert_eq!(frame.t, 10);
        assert_eq!(frame.start, 7);
        assert_eq!(frame.output.len(), 4);
        assert_eq!(frame.output, &engine.history().output()[7..]);

        let all = engine.frame(50);
        assert_eq!(all.start, 0);
        assert_eq!(all.input.len(), 11);
    }

    #[test]
    fn reset_clears_run_state_and_step_entries() {
        let mut engine = armed_step_engine();
        engine.tick();
        engine.tick();
        engine.reset();

        assert_eq!(engine.time_index(), 0);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.gate_state(), GateState::Idle);
        assert_eq!(engine.entries().step_magnitude, "");
        assert_eq!(engine.entries().gain, "2");
        assert!(engine.replay().is_empty());
    }

    #[test]
    fn controller_display_only_in_automatic() {
        let mut engine = armed_step_engine();
        engine.tick();
        assert!(engine.controller_display().is_none());

        engine.set_control_mode(ControlMode::Automatic);
        assert!(engine.controller_display().is_some());
    }
}
