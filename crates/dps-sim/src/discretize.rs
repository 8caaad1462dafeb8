//! Zero-order-hold discretization of the FOPDT model.
//!
//! The dead time `θ` is split into a whole number of samples `N` and a
//! fractional remainder. The remainder shows up as the weight split between the
//! two input taps:
//!
//! ```text
//! y[k] = a1*y[k-1] + b1*u[k-N] + b2*u[k-N-1]
//! ```

use crate::params::ParameterSet;
use serde::{Deserialize, Serialize};

/// Recurrence coefficients at a given sample period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscreteCoefficients {
    /// Output decay per sample, `exp(-T/tau)`.
    pub a1: f64,
    /// Weight of the tap delayed by `delay` samples.
    pub b1: f64,
    /// Weight of the tap delayed by `delay + 1` samples.
    pub b2: f64,
    /// Whole-sample dead time `N`.
    pub delay: usize,
    /// Fractional delay factor `m = 1 - (θ - N*T)/T`, in `(0, 1]`.
    pub m: f64,
}

/// Convert continuous parameters into recurrence coefficients.
pub fn discretize(params: &ParameterSet) -> DiscreteCoefficients {
    let period = params.period();
    let tau = params.tau();
    let gain = params.gain();

    let whole = (params.dead_time() / period).floor();
    let fraction = params.dead_time() - whole * period;
    let m = 1.0 - fraction / period;

    let a1 = (-period / tau).exp();
    let partial = (-m * period / tau).exp();

    DiscreteCoefficients {
        a1,
        b1: gain * (1.0 - partial),
        b2: gain * (partial - a1),
        delay: whole as usize,
        m,
    }
}
