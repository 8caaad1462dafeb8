//! Operator entries and the validated process parameter set.

use crate::error::SimResult;
use dps_core::ensure_positive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric entry fields exposed to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Gain,
    Tau,
    DeadTime,
    Period,
    StepMagnitude,
    NoiseMagnitude,
    Kc,
    SetPoint,
    IntegralTime,
    DerivativeTime,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Gain,
        Field::Tau,
        Field::DeadTime,
        Field::Period,
        Field::StepMagnitude,
        Field::NoiseMagnitude,
        Field::Kc,
        Field::SetPoint,
        Field::IntegralTime,
        Field::DerivativeTime,
    ];

    /// Stable snake_case name, used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Field::Gain => "gain",
            Field::Tau => "tau",
            Field::DeadTime => "dead_time",
            Field::Period => "period",
            Field::StepMagnitude => "step_magnitude",
            Field::NoiseMagnitude => "noise_magnitude",
            Field::Kc => "kc",
            Field::SetPoint => "set_point",
            Field::IntegralTime => "integral_time",
            Field::DerivativeTime => "derivative_time",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw text of every entry, exactly as last typed.
///
/// Nothing here is trusted; entries are parsed again on every tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entries {
    pub gain: String,
    pub tau: String,
    pub dead_time: String,
    pub period: String,
    pub step_magnitude: String,
    pub noise_magnitude: String,
    pub kc: String,
    pub set_point: String,
    pub integral_time: String,
    pub derivative_time: String,
}

impl Entries {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Gain => &self.gain,
            Field::Tau => &self.tau,
            Field::DeadTime => &self.dead_time,
            Field::Period => &self.period,
            Field::StepMagnitude => &self.step_magnitude,
            Field::NoiseMagnitude => &self.noise_magnitude,
            Field::Kc => &self.kc,
            Field::SetPoint => &self.set_point,
            Field::IntegralTime => &self.integral_time,
            Field::DerivativeTime => &self.derivative_time,
        }
    }

    pub fn set(&mut self, field: Field, text: impl Into<String>) {
        let slot = match field {
            Field::Gain => &mut self.gain,
            Field::Tau => &mut self.tau,
            Field::DeadTime => &mut self.dead_time,
            Field::Period => &mut self.period,
            Field::StepMagnitude => &mut self.step_magnitude,
            Field::NoiseMagnitude => &mut self.noise_magnitude,
            Field::Kc => &mut self.kc,
            Field::SetPoint => &mut self.set_point,
            Field::IntegralTime => &mut self.integral_time,
            Field::DerivativeTime => &mut self.derivative_time,
        };
        *slot = text.into();
    }
}

/// Continuous FOPDT parameters, all finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    gain: f64,
    tau: f64,
    dead_time: f64,
    period: f64,
}

impl ParameterSet {
    /// Create a validated parameter set.
    ///
    /// # Errors
    ///
    /// Returns error if any value is non-finite or not strictly positive.
    pub fn new(gain: f64, tau: f64, dead_time: f64, period: f64) -> SimResult<Self> {
        Ok(Self {
            gain: ensure_positive(gain, "gain")?,
            tau: ensure_positive(tau, "tau")?,
            dead_time: ensure_positive(dead_time, "dead_time")?,
            period: ensure_positive(period, "period")?,
        })
    }

    /// Build from values the caller has already checked.
    pub(crate) fn from_validated(gain: f64, tau: f64, dead_time: f64, period: f64) -> Self {
        Self {
            gain,
            tau,
            dead_time,
            period,
        }
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Time constant.
    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn dead_time(&self) -> f64 {
        self.dead_time
    }

    /// Sample period.
    pub fn period(&self) -> f64 {
        self.period
    }
}
