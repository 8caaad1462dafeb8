//! Scripted scenario execution.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use dps_project::Scenario;
use dps_sim::{BlockReason, Engine, TickOutcome};
use tracing::{info, warn};

use crate::clock::TickClock;
use crate::error::AppResult;
use crate::progress::{RunProgressEvent, RunStage};
use crate::scenario_service::{apply_action, build_engine, load_scenario};

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Overrides the scenario's tick count.
    pub ticks: Option<usize>,
    /// Pace ticks at the scenario interval instead of running flat out.
    pub realtime: bool,
}

/// What happened over a scripted run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub attempted: usize,
    pub accepted: usize,
    /// Blocked ticks keyed by reason text.
    pub blocked: BTreeMap<String, usize>,
    /// Accepted ticks that repeated an exhausted replay.
    pub holds: usize,
    /// Scripted actions that failed (for example an unreadable replay file).
    pub failed_actions: usize,
    pub final_t: usize,
    pub final_output: f64,
}

impl RunSummary {
    pub fn blocked_total(&self) -> usize {
        self.blocked.values().sum()
    }

    fn record(&mut self, outcome: &TickOutcome) {
        self.attempted += 1;
        match outcome {
            TickOutcome::Advanced(report) => {
                self.accepted += 1;
                if report.hold {
                    self.holds += 1;
                }
            }
            TickOutcome::Blocked(reason) => {
                let key = match reason {
                    BlockReason::GateIdle => reason.to_string(),
                    BlockReason::Invalid(e) => e.to_string(),
                };
                *self.blocked.entry(key).or_default() += 1;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunResponse {
    pub engine: Engine,
    pub summary: RunSummary,
    pub window: usize,
}

fn emit(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    event: RunProgressEvent,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(event);
    }
}

/// Run a loaded scenario.
///
/// Events scheduled at tick `k` are applied, in file order, right before the
/// `k`th clock tick (0-based) is attempted.
pub fn run_scenario(
    scenario: &Scenario,
    base_dir: &Path,
    options: &RunOptions,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    emit(
        &mut progress_cb,
        RunProgressEvent::stage(RunStage::BuildingEngine, 0.0, Some(scenario.name.clone())),
    );
    let mut engine = build_engine(scenario, base_dir)?;

    let ticks = options.ticks.unwrap_or(scenario.run.ticks);
    let mut clock = TickClock::from_millis(scenario.run.interval_ms, Instant::now());
    let mut summary = RunSummary::default();
    let mut events = scenario.events.iter().peekable();

    for tick in 0..ticks {
        while let Some(event) = events.next_if(|e| e.at_tick <= tick) {
            if let Err(e) = apply_action(&mut engine, &event.action, base_dir) {
                warn!(tick, error = %e, "scripted action failed");
                summary.failed_actions += 1;
            }
        }

        if options.realtime {
            std::thread::sleep(clock.time_until_tick(Instant::now()));
            clock.advance();
        }
        let outcome = engine.tick();
        summary.record(&outcome);

        emit(
            &mut progress_cb,
            RunProgressEvent {
                stage: RunStage::Running,
                elapsed_wall_s: started.elapsed().as_secs_f64(),
                tick: tick + 1,
                ticks_total: ticks,
                t: engine.time_index(),
                message: match &outcome {
                    TickOutcome::Blocked(reason) => Some(reason.to_string()),
                    TickOutcome::Advanced(_) => None,
                },
            },
        );
    }

    summary.final_t = engine.time_index();
    summary.final_output = engine.history().output().last().copied().unwrap_or(0.0);

    info!(
        name = %scenario.name,
        attempted = summary.attempted,
        accepted = summary.accepted,
        blocked = summary.blocked_total(),
        "scenario run finished"
    );
    emit(
        &mut progress_cb,
        RunProgressEvent::stage(
            RunStage::Completed,
            started.elapsed().as_secs_f64(),
            None,
        ),
    );

    Ok(RunResponse {
        engine,
        summary,
        window: scenario.run.window,
    })
}

/// Load a scenario file and run it. Relative replay paths resolve against the
/// scenario file's directory.
pub fn run_scenario_file(
    path: &Path,
    options: &RunOptions,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    emit(
        &mut progress_cb,
        RunProgressEvent::stage(RunStage::LoadingScenario, 0.0, None),
    );
    let scenario = load_scenario(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    run_scenario(&scenario, base_dir, options, progress_cb)
}
