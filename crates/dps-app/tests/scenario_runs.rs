//! End-to-end scripted runs through the service layer.

use std::path::PathBuf;

use dps_app::{
    AppError, RunOptions, RunProgressEvent, RunStage, read_replay_file, run_scenario,
    run_scenario_file,
};
use dps_project::{
    ActionDef, ControlDef, ControlModeDef, EntryDef, EventDef, InputDef, NoiseDef, ProcessDef,
    RunDef, Scenario,
};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dps_app_{name}"));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn step_scenario(ticks: usize) -> Scenario {
    Scenario {
        version: 1,
        name: "step".to_string(),
        parameters: ProcessDef {
            gain: 2.0,
            tau: 5.0,
            dead_time: 1.0,
            period: 1.0,
        },
        input: InputDef::Step { magnitude: 10.0 },
        noise: NoiseDef::default(),
        control: ControlDef::default(),
        run: RunDef {
            ticks,
            interval_ms: 1,
            window: 50,
        },
        events: vec![],
    }
}

#[test]
fn step_run_reaches_process_gain() {
    let response = run_scenario(
        &step_scenario(200),
        &temp_dir("step"),
        &RunOptions::default(),
        None,
    )
    .unwrap();

    assert_eq!(response.summary.attempted, 200);
    assert_eq!(response.summary.accepted, 200);
    assert_eq!(response.summary.blocked_total(), 0);
    assert_eq!(response.summary.final_t, 200);
    assert!((response.summary.final_output - 20.0).abs() < 1e-6);
    assert_eq!(response.window, 50);
}

#[test]
fn unconfirmed_edit_blocks_until_confirmed() {
    let mut scenario = step_scenario(10);
    scenario.events = vec![
        EventDef {
            at_tick: 3,
            action: ActionDef::Edit {
                field: EntryDef::Gain,
                text: "4".to_string(),
            },
        },
        EventDef {
            at_tick: 6,
            action: ActionDef::Confirm {
                field: EntryDef::Gain,
            },
        },
    ];

    let response =
        run_scenario(&scenario, &temp_dir("edit"), &RunOptions::default(), None).unwrap();

    assert_eq!(response.summary.attempted, 10);
    assert_eq!(response.summary.accepted, 7);
    assert_eq!(response.summary.blocked.get("gate idle"), Some(&3));
    assert_eq!(response.engine.time_index(), 7);
}

#[test]
fn tick_override_and_progress_events() {
    let mut events: Vec<RunProgressEvent> = Vec::new();
    let options = RunOptions {
        ticks: Some(5),
        realtime: false,
    };
    let mut cb = |e: RunProgressEvent| events.push(e);
    run_scenario(&step_scenario(100), &temp_dir("progress"), &options, Some(&mut cb)).unwrap();

    assert!(matches!(events[0].stage, RunStage::BuildingEngine));
    assert!(matches!(events.last().unwrap().stage, RunStage::Completed));
    let running: Vec<_> = events
        .iter()
        .filter(|e| e.stage == RunStage::Running)
        .collect();
    assert_eq!(running.len(), 5);
    assert_eq!(running[4].tick, 5);
    assert_eq!(running[4].ticks_total, 5);
    assert_eq!(running[4].fraction_complete(), 1.0);
}

#[test]
fn file_scenario_replays_and_reloads_relative_paths() {
    let dir = temp_dir("replay");
    std::fs::write(dir.join("first.txt"), "5\n6\n7\n").unwrap();
    std::fs::write(dir.join("second.txt"), "-1\n-2\n").unwrap();
    let yaml = r#"
version: 1
name: Replay
parameters: { gain: 1.0, tau: 3.0, dead_time: 1.0, period: 1.0 }
input: { type: File, path: first.txt }
run: { ticks: 6, interval_ms: 1 }
events:
  - at_tick: 2
    action: { type: LoadReplay, path: second.txt }
"#;
    let path = dir.join("replay.yaml");
    std::fs::write(&path, yaml).unwrap();

    let response = run_scenario_file(&path, &RunOptions::default(), None).unwrap();
    assert_eq!(
        response.engine.history().input(),
        &[0.0, 6.0, 7.0, -1.0, -2.0, -2.0, -2.0]
    );
    assert_eq!(response.summary.holds, 2);
}

#[test]
fn failed_reload_is_counted_and_run_continues() {
    let dir = temp_dir("bad_reload");
    std::fs::write(dir.join("ok.txt"), "1\n2\n3\n").unwrap();
    std::fs::write(dir.join("bad.txt"), "1\nnope\n").unwrap();

    let mut scenario = step_scenario(3);
    scenario.input = InputDef::File {
        path: "ok.txt".into(),
    };
    scenario.events = vec![EventDef {
        at_tick: 1,
        action: ActionDef::LoadReplay {
            path: "bad.txt".into(),
        },
    }];

    let response = run_scenario(&scenario, &dir, &RunOptions::default(), None).unwrap();
    assert_eq!(response.summary.failed_actions, 1);
    assert_eq!(response.engine.history().input(), &[0.0, 2.0, 3.0, 3.0]);
}

#[test]
fn automatic_scenario_regulates() {
    let mut scenario = step_scenario(300);
    scenario.input = InputDef::Step { magnitude: 1.0 };
    scenario.control = ControlDef {
        mode: ControlModeDef::Automatic,
        kc: Some(0.5),
        set_point: Some(10.0),
        integral_time: Some(5.0),
        derivative_time: Some(0.0),
    };
    let response =
        run_scenario(&scenario, &temp_dir("auto"), &RunOptions::default(), None).unwrap();
    assert!((response.summary.final_output - 10.0).abs() < 1e-6);
}

#[test]
fn replay_file_errors_carry_path() {
    let dir = temp_dir("replay_errors");
    let empty = dir.join("empty.txt");
    std::fs::write(&empty, "\n\n").unwrap();
    assert!(matches!(
        read_replay_file(&empty),
        Err(AppError::Replay { .. })
    ));
    assert!(matches!(
        read_replay_file(&dir.join("missing.txt")),
        Err(AppError::ReplayFileRead { .. })
    ));
}
