use std::path::{Path, PathBuf};

use dps_app::{RunOptions, run_scenario_file, scenario_service};

fn scenarios_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenarios")
}

#[test]
fn shipped_scenarios_load_and_validate() {
    for name in [
        "step-response.yaml",
        "pid-regulation.yaml",
        "replay-ramp.yaml",
    ] {
        let path = scenarios_dir().join(name);
        scenario_service::load_scenario(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
    }
}

#[test]
fn step_response_scenario_blocks_while_editing() {
    let response = run_scenario_file(
        &scenarios_dir().join("step-response.yaml"),
        &RunOptions::default(),
        None,
    )
    .unwrap();
    assert_eq!(response.summary.attempted, 60);
    assert_eq!(response.summary.accepted, 57);
    assert_eq!(response.summary.blocked.get("gate idle"), Some(&3));

    let h = response.engine.history();
    assert_eq!(h.noise()[30], 0.0);
    assert_eq!(h.noise()[31], 1.5);
    assert_eq!(*h.input().last().unwrap(), 5.0);
}

#[test]
fn pid_scenario_follows_set_point_change() {
    let response = run_scenario_file(
        &scenarios_dir().join("pid-regulation.yaml"),
        &RunOptions::default(),
        None,
    )
    .unwrap();
    assert_eq!(response.summary.accepted, 200);
    assert!((response.summary.final_output - 4.0).abs() < 1e-3);
}

#[test]
fn replay_scenario_holds_then_continues() {
    let response = run_scenario_file(
        &scenarios_dir().join("replay-ramp.yaml"),
        &RunOptions::default(),
        None,
    )
    .unwrap();
    assert_eq!(response.summary.accepted, 40);
    assert_eq!(response.summary.holds, 8);

    let u = response.engine.history().input();
    assert_eq!(u[17], 0.0);
    assert_eq!(u[25], 0.0);
    // Reloaded file starts over at the next index.
    assert_eq!(u[26], 0.0);
    assert_eq!(u[27], 1.0);
    assert_eq!(u[36], 10.0);
}
