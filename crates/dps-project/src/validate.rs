//! Scenario validation logic.

use crate::schema::{ActionDef, ControlModeDef, InputDef, Scenario};
use dps_core::{ensure_finite, ensure_positive};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing value: {field} ({reason})")]
    MissingValue { field: String, reason: String },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Event {index} at tick {at_tick} is out of order")]
    EventOrder { index: usize, at_tick: usize },

    #[error("Event {index} at tick {at_tick} is beyond the run of {ticks} ticks")]
    EventBeyondRun {
        index: usize,
        at_tick: usize,
        ticks: usize,
    },
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    ensure_positive(value, "scenario value")
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite and > 0".to_string(),
        })
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    ensure_finite(value, "scenario value")
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        })
}

fn nonzero(field: &str, value: usize) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    let p = &scenario.parameters;
    positive("parameters.gain", p.gain)?;
    positive("parameters.tau", p.tau)?;
    positive("parameters.dead_time", p.dead_time)?;
    positive("parameters.period", p.period)?;

    if let InputDef::Step { magnitude } = scenario.input {
        finite("input.magnitude", magnitude)?;
    }
    finite("noise.magnitude", scenario.noise.magnitude)?;

    let c = &scenario.control;
    for (field, value) in [
        ("control.kc", c.kc),
        ("control.set_point", c.set_point),
        ("control.integral_time", c.integral_time),
        ("control.derivative_time", c.derivative_time),
    ] {
        match value {
            Some(v) => finite(field, v)?,
            None if c.mode == ControlModeDef::Automatic => {
                return Err(ValidationError::MissingValue {
                    field: field.to_string(),
                    reason: "required in automatic mode".to_string(),
                });
            }
            None => {}
        }
    }
    if c.integral_time == Some(0.0) {
        return Err(ValidationError::InvalidValue {
            field: "control.integral_time".to_string(),
            value: "0".to_string(),
            reason: "must be non-zero".to_string(),
        });
    }
    if c.mode == ControlModeDef::Automatic && matches!(scenario.input, InputDef::File { .. }) {
        return Err(ValidationError::Unsupported {
            feature: "file replay in automatic mode".to_string(),
            reason: "the controller drives the process input".to_string(),
        });
    }

    nonzero("run.ticks", scenario.run.ticks)?;
    nonzero("run.window", scenario.run.window)?;
    if scenario.run.interval_ms == 0 {
        return Err(ValidationError::InvalidValue {
            field: "run.interval_ms".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let mut last_tick = 0;
    for (index, event) in scenario.events.iter().enumerate() {
        if event.at_tick < last_tick {
            return Err(ValidationError::EventOrder {
                index,
                at_tick: event.at_tick,
            });
        }
        if event.at_tick >= scenario.run.ticks {
            return Err(ValidationError::EventBeyondRun {
                index,
                at_tick: event.at_tick,
                ticks: scenario.run.ticks,
            });
        }
        if let ActionDef::Commit { value, .. } = event.action {
            finite(&format!("events[{index}].value"), value)?;
        }
        last_tick = event.at_tick;
    }

    Ok(())
}
