//! Per-tick validation of operator entries and modes.

use crate::engine::Modes;
use crate::error::ValidationError;
use crate::params::{Entries, Field, ParameterSet};
use crate::source::{InputMode, InputSample, InputSource, NoiseSource, ReplaySequence};
use dps_controls::{ControlMode, PidCoefficients, PidGains, SetPoint};
use dps_core::{ensure_positive, parse_real};

/// Everything a validated tick needs, resolved from the raw entries.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TickPlan {
    pub params: ParameterSet,
    pub input: InputSample,
    pub noise: NoiseSource,
    pub coefficients: PidCoefficients,
    pub set_point: SetPoint,
}

fn number(entries: &Entries, field: Field) -> Result<f64, ValidationError> {
    parse_real(entries.get(field), field.name())
        .map_err(|source| ValidationError::ParameterInvalid { field, source })
}

fn positive(entries: &Entries, field: Field) -> Result<f64, ValidationError> {
    parse_real(entries.get(field), field.name())
        .and_then(|v| ensure_positive(v, field.name()))
        .map_err(|source| ValidationError::ParameterInvalid { field, source })
}

fn gains(entries: &Entries) -> Result<PidGains, ValidationError> {
    let kc = number(entries, Field::Kc)?;
    let integral_time = number(entries, Field::IntegralTime)?;
    let derivative_time = number(entries, Field::DerivativeTime)?;
    Ok(PidGains::new(kc, integral_time, derivative_time)?)
}

/// Validate the entries for the tick that would produce index `cursor`.
pub(crate) fn plan_tick(
    entries: &Entries,
    modes: &Modes,
    replay: &ReplaySequence,
    cursor: usize,
) -> Result<TickPlan, ValidationError> {
    let params = ParameterSet::from_validated(
        positive(entries, Field::Gain)?,
        positive(entries, Field::Tau)?,
        positive(entries, Field::DeadTime)?,
        positive(entries, Field::Period)?,
    );

    if modes.input == InputMode::FileReplay && modes.control.is_automatic() {
        return Err(ValidationError::ModeConflict {
            what: "file replay cannot drive the process in automatic mode",
        });
    }

    let source = match modes.input {
        InputMode::ConstantStep => InputSource::ConstantStep {
            magnitude: number(entries, Field::StepMagnitude)?,
        },
        InputMode::FileReplay => InputSource::FileReplay(replay),
    };
    let input = source
        .sample(cursor)
        .ok_or(ValidationError::InputSourceEmpty)?;

    let noise = if modes.noise_enabled {
        NoiseSource::Step {
            magnitude: number(entries, Field::NoiseMagnitude)?,
        }
    } else {
        NoiseSource::Off
    };

    let (coefficients, set_point) = match modes.control {
        ControlMode::Automatic => (
            gains(entries)?.coefficients(params.period())?,
            SetPoint::Fixed(number(entries, Field::SetPoint)?),
        ),
        // Tuning is optional while the operator drives the process.
        ControlMode::Manual => (
            gains(entries)
                .ok()
                .and_then(|g| g.coefficients(params.period()).ok())
                .unwrap_or(PidCoefficients::ZERO),
            SetPoint::Track,
        ),
    };

    Ok(TickPlan {
        params,
        input,
        noise,
        coefficients,
        set_point,
    })
}
