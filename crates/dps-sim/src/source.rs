//! Process input and disturbance sources.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// Value substituted for a step magnitude of exactly zero.
pub const ZERO_STEP_FLOOR: f64 = 1e-13;

/// Where the process input comes from when the operator drives it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    #[default]
    ConstantStep,
    FileReplay,
}

/// One input sample produced for a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSample {
    pub value: f64,
    /// The replay ran out and `value` repeats the last sample.
    pub hold: bool,
}

/// Input source resolved for a single tick.
#[derive(Debug, Clone, Copy)]
pub enum InputSource<'a> {
    ConstantStep { magnitude: f64 },
    FileReplay(&'a ReplaySequence),
}

impl InputSource<'_> {
    /// Sample the source at `cursor`. `None` means the source is not ready.
    pub fn sample(&self, cursor: usize) -> Option<InputSample> {
        match self {
            InputSource::ConstantStep { magnitude } => {
                let value = if *magnitude == 0.0 {
                    ZERO_STEP_FLOOR
                } else {
                    *magnitude
                };
                Some(InputSample { value, hold: false })
            }
            InputSource::FileReplay(sequence) => sequence.sample(cursor),
        }
    }
}

/// Pre-loaded replay samples, indexed by the simulation time index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySequence {
    samples: Vec<f64>,
}

impl ReplaySequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample at `cursor`, repeating the last sample once the data runs out.
    pub fn sample(&self, cursor: usize) -> Option<InputSample> {
        match self.samples.get(cursor) {
            Some(&value) => Some(InputSample { value, hold: false }),
            None => self
                .samples
                .last()
                .map(|&value| InputSample { value, hold: true }),
        }
    }

    /// Install freshly loaded samples.
    ///
    /// Once input beyond the sentinel has been produced (`produced`, indices
    /// `0..=t` with `t > 0`), it is put in front of the new samples so the
    /// next tick replays `loaded[0]`, whatever source produced it. A load at
    /// `t == 0` is installed as-is. Returns the length of the prefix.
    ///
    /// # Errors
    ///
    /// Rejects an empty or non-finite load and leaves the current sequence
    /// untouched.
    pub fn load(&mut self, loaded: Vec<f64>, produced: &[f64]) -> SimResult<usize> {
        if loaded.is_empty() {
            return Err(SimError::ReplayEmpty);
        }
        if let Some(&value) = loaded.iter().find(|v| !v.is_finite()) {
            return Err(SimError::NonFinite {
                what: "replay sample",
                value,
            });
        }

        if produced.len() <= 1 {
            self.samples = loaded;
            return Ok(0);
        }

        let mut samples = Vec::with_capacity(produced.len() + loaded.len());
        samples.extend_from_slice(produced);
        samples.extend(loaded);
        self.samples = samples;
        Ok(produced.len())
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// Deterministic disturbance added to the process output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum NoiseSource {
    #[default]
    Off,
    /// A persistent disturbance step of constant magnitude.
    Step { magnitude: f64 },
}

impl NoiseSource {
    pub fn sample(&self) -> f64 {
        match self {
            NoiseSource::Off => 0.0,
            NoiseSource::Step { magnitude } => *magnitude,
        }
    }
}
