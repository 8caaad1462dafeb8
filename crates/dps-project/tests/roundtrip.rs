use dps_project::*;

fn step_scenario() -> Scenario {
    Scenario {
        version: LATEST_VERSION,
        name: "Step Response".to_string(),
        parameters: ProcessDef {
            gain: 2.0,
            tau: 5.0,
            dead_time: 1.0,
            period: 1.0,
        },
        input: InputDef::Step { magnitude: 10.0 },
        noise: NoiseDef {
            enabled: true,
            magnitude: 0.5,
        },
        control: ControlDef::default(),
        run: RunDef {
            ticks: 20,
            interval_ms: 100,
            window: 50,
        },
        events: vec![
            EventDef {
                at_tick: 5,
                action: ActionDef::Commit {
                    field: EntryDef::StepMagnitude,
                    value: 4.0,
                },
            },
            EventDef {
                at_tick: 10,
                action: ActionDef::SetControlMode {
                    mode: ControlModeDef::Manual,
                },
            },
        ],
    }
}

#[test]
fn roundtrip_yaml_step_scenario() {
    let scenario = step_scenario();
    let path = std::env::temp_dir().join("dps_project_roundtrip_step.yaml");

    save_yaml(&path, &scenario).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn roundtrip_json_step_scenario() {
    let scenario = step_scenario();
    let path = std::env::temp_dir().join("dps_project_roundtrip_step.json");

    save_json(&path, &scenario).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(scenario, loaded);
}

#[test]
fn minimal_yaml_takes_defaults() {
    let yaml = r#"
version: 1
name: Minimal
parameters:
  gain: 1.0
  tau: 3.0
  dead_time: 1.0
  period: 1.0
"#;
    let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
    validate_scenario(&scenario).unwrap();

    assert_eq!(scenario.input, InputDef::Step { magnitude: 1.0 });
    assert!(!scenario.noise.enabled);
    assert_eq!(scenario.control.mode, ControlModeDef::Manual);
    assert_eq!(scenario.run.ticks, 100);
    assert_eq!(scenario.run.window, 50);
    assert!(scenario.events.is_empty());
}

#[test]
fn tagged_actions_parse() {
    let yaml = r#"
version: 1
name: Replay
parameters: { gain: 1.0, tau: 3.0, dead_time: 1.0, period: 1.0 }
input:
  type: File
  path: data/replay.txt
run: { ticks: 10 }
events:
  - at_tick: 2
    action: { type: Edit, field: Gain, text: "1." }
  - at_tick: 4
    action: { type: LoadReplay, path: more.txt }
  - at_tick: 6
    action: { type: Reset }
"#;
    let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
    validate_scenario(&scenario).unwrap();

    assert_eq!(
        scenario.input,
        InputDef::File {
            path: "data/replay.txt".into()
        }
    );
    assert_eq!(
        scenario.events[0].action,
        ActionDef::Edit {
            field: EntryDef::Gain,
            text: "1.".to_string()
        }
    );
    assert_eq!(scenario.events[2].action, ActionDef::Reset);
}

#[test]
fn save_refuses_invalid_scenario() {
    let mut scenario = step_scenario();
    scenario.parameters.tau = -1.0;
    let path = std::env::temp_dir().join("dps_project_roundtrip_invalid.yaml");

    let err = save_yaml(&path, &scenario).unwrap_err();
    assert!(matches!(err, ScenarioError::Validation(_)));
}
