use dcm_project::schema::*;
use dcm_project::{
    ProjectError, default_config, load, load_json, load_yaml, save, save_json, save_yaml,
    validate_project,
};

#[test]
fn roundtrip_yaml_default_project() {
    let project = default_config();
    validate_project(&project).unwrap();

    let path = std::env::temp_dir().join("dcm_project_roundtrip_default.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json_open_loop_project() {
    let project = ProjectConfig {
        version: LATEST_VERSION,
        name: "open-loop".to_string(),
        motor: dcm_project::default_motor(),
        initial_state: InitialStateDef { ia: 1.5, w: 20.0 },
        simulation: SimulationDef {
            h: 5e-4,
            kh: 4,
            method: "rk4".to_string(),
        },
        controller: None,
        scenario: Some(ScenarioDef {
            duration_s: 0.5,
            drive: DriveDef::Voltage { volts: 240.0 },
            load_steps: vec![LoadStepDef {
                at_s: 0.25,
                tlc: 10.0,
                tlw: 0.01,
            }],
        }),
    };

    let path = std::env::temp_dir().join("dcm_project_roundtrip_open_loop.json");
    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn load_dispatches_on_extension() {
    let project = default_config();
    let dir = std::env::temp_dir();

    for name in ["dcm_project_dispatch.yml", "dcm_project_dispatch.JSON"] {
        let path = dir.join(name);
        save(&path, &project).unwrap();
        assert_eq!(load(&path).unwrap(), project);
    }

    let path = dir.join("dcm_project_dispatch.toml");
    assert!(matches!(
        save(&path, &project),
        Err(ProjectError::UnsupportedFormat { .. })
    ));
}

#[test]
fn save_refuses_invalid_project() {
    let mut project = default_config();
    project.simulation.kh = 0;

    let path = std::env::temp_dir().join("dcm_project_invalid.yaml");
    assert!(matches!(
        save_yaml(&path, &project),
        Err(ProjectError::Validation(_))
    ));
}
