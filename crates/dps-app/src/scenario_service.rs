//! Scenario loading and engine construction.

use std::path::{Path, PathBuf};

use dps_controls::ControlMode;
use dps_project::{ActionDef, ControlModeDef, EntryDef, InputDef, InputModeDef, Scenario};
use dps_sim::{Engine, Field, InputMode};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::replay_io::load_replay_file;

/// Load and validate a scenario (YAML, or JSON by extension).
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    if !path.exists() {
        return Err(AppError::ScenarioFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        });
    }
    Ok(dps_project::load(path)?)
}

pub fn field_for(entry: EntryDef) -> Field {
    match entry {
        EntryDef::Gain => Field::Gain,
        EntryDef::Tau => Field::Tau,
        EntryDef::DeadTime => Field::DeadTime,
        EntryDef::Period => Field::Period,
        EntryDef::StepMagnitude => Field::StepMagnitude,
        EntryDef::NoiseMagnitude => Field::NoiseMagnitude,
        EntryDef::Kc => Field::Kc,
        EntryDef::SetPoint => Field::SetPoint,
        EntryDef::IntegralTime => Field::IntegralTime,
        EntryDef::DerivativeTime => Field::DerivativeTime,
    }
}

fn input_mode(mode: InputModeDef) -> InputMode {
    match mode {
        InputModeDef::Step => InputMode::ConstantStep,
        InputModeDef::File => InputMode::FileReplay,
    }
}

fn control_mode(mode: ControlModeDef) -> ControlMode {
    match mode {
        ControlModeDef::Manual => ControlMode::Manual,
        ControlModeDef::Automatic => ControlMode::Automatic,
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Build an engine in the scenario's initial configuration.
///
/// Every configured entry is committed, so the engine starts armed. Relative
/// replay paths resolve against `base_dir`.
pub fn build_engine(scenario: &Scenario, base_dir: &Path) -> AppResult<Engine> {
    let mut engine = Engine::new();

    let p = &scenario.parameters;
    engine.commit(Field::Gain, p.gain.to_string());
    engine.commit(Field::Tau, p.tau.to_string());
    engine.commit(Field::DeadTime, p.dead_time.to_string());
    engine.commit(Field::Period, p.period.to_string());

    match &scenario.input {
        InputDef::Step { magnitude } => {
            engine.set_input_mode(InputMode::ConstantStep);
            engine.commit(Field::StepMagnitude, magnitude.to_string());
        }
        InputDef::File { path } => {
            engine.set_input_mode(InputMode::FileReplay);
            load_replay_file(&mut engine, &resolve(base_dir, path))?;
        }
    }

    engine.set_noise_enabled(scenario.noise.enabled);
    engine.commit(Field::NoiseMagnitude, scenario.noise.magnitude.to_string());

    let c = &scenario.control;
    for (field, value) in [
        (Field::Kc, c.kc),
        (Field::SetPoint, c.set_point),
        (Field::IntegralTime, c.integral_time),
        (Field::DerivativeTime, c.derivative_time),
    ] {
        if let Some(v) = value {
            engine.commit(field, v.to_string());
        }
    }
    engine.set_control_mode(control_mode(c.mode));

    debug!(name = %scenario.name, "engine built from scenario");
    Ok(engine)
}

/// Apply one scripted operator action.
pub fn apply_action(engine: &mut Engine, action: &ActionDef, base_dir: &Path) -> AppResult<()> {
    match action {
        ActionDef::Edit { field, text } => engine.edit(field_for(*field), text.clone()),
        ActionDef::Confirm { field } => engine.confirm(field_for(*field)),
        ActionDef::Commit { field, value } => engine.commit(field_for(*field), value.to_string()),
        ActionDef::SetInputMode { mode } => engine.set_input_mode(input_mode(*mode)),
        ActionDef::SetNoise { enabled } => engine.set_noise_enabled(*enabled),
        ActionDef::SetControlMode { mode } => engine.set_control_mode(control_mode(*mode)),
        ActionDef::LoadReplay { path } => {
            load_replay_file(engine, &resolve(base_dir, path))?;
        }
        ActionDef::Reset => engine.reset(),
    }
    Ok(())
}
