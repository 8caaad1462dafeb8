//! Scenario schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    pub parameters: ProcessDef,
    #[serde(default)]
    pub input: InputDef,
    #[serde(default)]
    pub noise: NoiseDef,
    #[serde(default)]
    pub control: ControlDef,
    #[serde(default)]
    pub run: RunDef,
    #[serde(default)]
    pub events: Vec<EventDef>,
}

/// Continuous FOPDT parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessDef {
    pub gain: f64,
    pub tau: f64,
    pub dead_time: f64,
    pub period: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum InputDef {
    Step {
        magnitude: f64,
    },
    /// Replay text file; relative paths resolve against the scenario file.
    File {
        path: PathBuf,
    },
}

impl Default for InputDef {
    fn default() -> Self {
        InputDef::Step { magnitude: 1.0 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NoiseDef {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub magnitude: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ControlModeDef {
    #[default]
    Manual,
    Automatic,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InputModeDef {
    Step,
    File,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ControlDef {
    #[serde(default)]
    pub mode: ControlModeDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_point: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integral_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derivative_time: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunDef {
    /// Clock ticks to attempt.
    #[serde(default = "default_ticks")]
    pub ticks: usize,
    /// Wall-clock interval between ticks when running in real time.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Samples shown per plot window.
    #[serde(default = "default_window")]
    pub window: usize,
}

impl Default for RunDef {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            interval_ms: default_interval_ms(),
            window: default_window(),
        }
    }
}

fn default_ticks() -> usize {
    100
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_window() -> usize {
    50
}

/// Operator action applied before clock tick number `at_tick` (0-based).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDef {
    pub at_tick: usize,
    pub action: ActionDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryDef {
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

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ActionDef {
    /// Type into an entry without confirming it.
    Edit { field: EntryDef, text: String },
    Confirm { field: EntryDef },
    /// Type a number and confirm it.
    Commit { field: EntryDef, value: f64 },
    SetInputMode { mode: InputModeDef },
    SetNoise { enabled: bool },
    SetControlMode { mode: ControlModeDef },
    LoadReplay { path: PathBuf },
    Reset,
}
