//! FOPDT process recurrence and run history.

use crate::discretize::DiscreteCoefficients;

/// Append-only sample histories, all indexed by the time index `t`.
///
/// Every sequence always has the same length, `t + 1`. Index 0 is the
/// sentinel sample created at construction and on reset.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    input: Vec<f64>,
    noise: Vec<f64>,
    system_output: Vec<f64>,
    output: Vec<f64>,
}

impl Default for History {
    fn default() -> Self {
        Self {
            input: vec![0.0],
            noise: vec![0.0],
            system_output: vec![0.0],
            output: vec![0.0],
        }
    }
}

impl History {
    /// Number of samples in every sequence.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    /// Always false: the sentinel sample is never removed.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn noise(&self) -> &[f64] {
        &self.noise
    }

    /// Process response before the disturbance is added.
    pub fn system_output(&self) -> &[f64] {
        &self.system_output
    }

    /// Measured output, `system_output + noise`.
    pub fn output(&self) -> &[f64] {
        &self.output
    }
}

/// Owns the histories and applies the discrete recurrence once per tick.
#[derive(Debug, Clone, Default)]
pub struct ProcessSimulator {
    history: History,
}

impl ProcessSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Index of the newest sample.
    pub fn time_index(&self) -> usize {
        self.history.len() - 1
    }

    /// Index the next [`step`](Self::step) will produce.
    pub fn next_index(&self) -> usize {
        self.history.len()
    }

    /// Produce the sample at the next time index.
    ///
    /// Appends `input` and `noise` first, then evaluates the recurrence for the
    /// same index so the newest input tap is available to it. Returns the
    /// measured output.
    pub fn step(&mut self, coeffs: &DiscreteCoefficients, input: f64, noise: f64) -> f64 {
        let h = &mut self.history;
        let t = h.len();
        h.input.push(input);
        h.noise.push(noise);

        let y = respond(coeffs, &h.system_output, &h.input, t);
        h.system_output.push(y);
        h.output.push(y + noise);
        y + noise
    }

    pub fn reset(&mut self) {
        self.history = History::default();
    }
}

/// Evaluate the process response at index `t`.
///
/// Early samples lack the delayed input taps, so the recurrence degrades from
/// the full two-tap form to one tap, then to pure decay, then to zero at
/// `t == 0`. `system_output` must hold indices `0..t`, `input` indices `0..=t`.
fn respond(coeffs: &DiscreteCoefficients, system_output: &[f64], input: &[f64], t: usize) -> f64 {
    let n = coeffs.delay;
    let Some(prev) = t.checked_sub(1).map(|i| system_output[i]) else {
        return 0.0;
    };
    let decay = coeffs.a1 * prev;

    match (t.checked_sub(n), t.checked_sub(n).and_then(|i| i.checked_sub(1))) {
        (Some(i0), Some(i1)) => decay + coeffs.b1 * input[i0] + coeffs.b2 * input[i1],
        (Some(i0), None) => decay + coeffs.b1 * input[i0],
        (None, _) => decay,
    }
}
