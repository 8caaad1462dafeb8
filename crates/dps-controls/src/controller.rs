//! Incremental PID controller.
//!
//! The sampled coefficients follow the standard "mixed" difference-equation
//! form of a PID with integral time `Ti` and derivative time `Td`:
//!
//! - `q0 = kc * (1 + T/Ti + Td/T)`
//! - `q1 = kc * (-1 - 2*Td/T)`
//! - `q2 = kc * Td/T`
//!
//! The controller output is a correction added to the previous input, not an
//! absolute position, so switching between manual and automatic is bumpless.

use crate::error::{ControlError, ControlResult};
use dps_core::ensure_finite;
use serde::{Deserialize, Serialize};

/// Who drives the process input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    /// The operator's input source drives the process; the set point follows
    /// the measured output.
    #[default]
    Manual,
    /// The controller output drives the process toward a fixed set point.
    Automatic,
}

impl ControlMode {
    pub fn is_automatic(self) -> bool {
        matches!(self, ControlMode::Automatic)
    }
}

/// Set point policy for a single update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetPoint {
    /// Redefine the set point as the measurement being processed.
    Track,
    /// Regulate toward a fixed target.
    Fixed(f64),
}

impl SetPoint {
    fn resolve(self, pv: f64) -> f64 {
        match self {
            SetPoint::Track => pv,
            SetPoint::Fixed(sp) => sp,
        }
    }
}

/// Operator-facing PID tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    /// Controller gain.
    pub kc: f64,
    /// Integral time, same time unit as the sample period.
    pub integral_time: f64,
    /// Derivative time, same time unit as the sample period.
    pub derivative_time: f64,
}

impl PidGains {
    /// Create a new set of gains.
    ///
    /// No sign constraint is imposed; the values only have to be finite and
    /// `integral_time` has to be non-zero because it divides the period.
    pub fn new(kc: f64, integral_time: f64, derivative_time: f64) -> ControlResult<Self> {
        ensure_finite(kc, "kc")?;
        ensure_finite(integral_time, "integral_time")?;
        ensure_finite(derivative_time, "derivative_time")?;
        if integral_time == 0.0 {
            return Err(ControlError::InvalidArg {
                what: "integral_time must be non-zero",
            });
        }
        Ok(Self {
            kc,
            integral_time,
            derivative_time,
        })
    }

    /// Sample the gains at `period`.
    pub fn coefficients(&self, period: f64) -> ControlResult<PidCoefficients> {
        PidCoefficients::from_gains(self, period)
    }
}

/// Sampled difference-equation coefficients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PidCoefficients {
    pub q0: f64,
    pub q1: f64,
    pub q2: f64,
}

impl PidCoefficients {
    /// Coefficients of a controller that never corrects.
    pub const ZERO: Self = Self {
        q0: 0.0,
        q1: 0.0,
        q2: 0.0,
    };

    pub fn from_gains(gains: &PidGains, period: f64) -> ControlResult<Self> {
        if !(period > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "period must be positive",
            });
        }
        let kc = gains.kc;
        let td_over_t = gains.derivative_time / period;
        let q0 = kc * (1.0 + period / gains.integral_time + td_over_t);
        let q1 = kc * (-1.0 - 2.0 * td_over_t);
        let q2 = kc * td_over_t;
        Ok(Self {
            q0: ensure_finite(q0, "q0")?,
            q1: ensure_finite(q1, "q1")?,
            q2: ensure_finite(q2, "q2")?,
        })
    }

    /// Velocity-form correction for an error history.
    pub fn correction(&self, state: &PidState) -> f64 {
        self.q0 * state.e_k0 + self.q1 * state.e_k1 + self.q2 * state.e_k2
    }

    /// Compute the next manipulated variable.
    ///
    /// # Arguments
    ///
    /// * `state` - Controller state before this sample
    /// * `set_point` - Set point policy for this sample
    /// * `pv` - Process output just produced
    /// * `input` - Process input that produced `pv`
    ///
    /// # Returns
    ///
    /// Updated state and the manipulated variable `m_k`.
    pub fn update(
        &self,
        state: &PidState,
        set_point: SetPoint,
        pv: f64,
        input: f64,
    ) -> (PidState, f64) {
        let sp = set_point.resolve(pv);

        let mut next = PidState {
            e_k2: state.e_k1,
            e_k1: state.e_k0,
            e_k0: sp - pv,
            set_point: sp,
            manipulated: None,
        };
        let m_k = input + self.correction(&next);
        next.manipulated = Some(m_k);

        (next, m_k)
    }
}

/// Error history and last output of the controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PidState {
    /// Error at the latest sample.
    pub e_k0: f64,
    /// Error one sample back.
    pub e_k1: f64,
    /// Error two samples back.
    pub e_k2: f64,
    /// Set point used at the latest sample.
    pub set_point: f64,
    /// Latest manipulated variable, `None` until the first update.
    pub manipulated: Option<f64>,
}

/// Stateful wrapper that applies one update per accepted tick.
#[derive(Debug, Clone, Default)]
pub struct PidController {
    state: PidState,
    coefficients: PidCoefficients,
}

impl PidController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PidState {
        &self.state
    }

    /// Coefficients used by the latest update.
    pub fn coefficients(&self) -> PidCoefficients {
        self.coefficients
    }

    /// Manipulated variable to feed the process on the next tick.
    pub fn output(&self) -> Option<f64> {
        self.state.manipulated
    }

    pub fn update(
        &mut self,
        coefficients: PidCoefficients,
        set_point: SetPoint,
        pv: f64,
        input: f64,
    ) -> f64 {
        let (state, m_k) = coefficients.update(&self.state, set_point, pv, input);
        self.state = state;
        self.coefficients = coefficients;
        m_k
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
