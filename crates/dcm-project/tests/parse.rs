use dcm_project::{ProjectConfig, ValidationError, validate_project};

const MINIMAL: &str = r#"
version: 1
name: bench-motor
motor:
  r: 1.086
  l: 0.01216
  j: 0.04251
  b: 0.003406
  k1: 1.07633
  k2: 1.07633
simulation:
  h: 0.001
"#;

#[test]
fn minimal_file_fills_defaults() {
    let project: ProjectConfig = serde_yaml::from_str(MINIMAL).unwrap();
    validate_project(&project).unwrap();

    assert_eq!(project.simulation.kh, 1);
    assert_eq!(project.simulation.method, "euler");
    assert_eq!(project.initial_state.ia, 0.0);
    assert_eq!(project.initial_state.w, 0.0);
    assert!(project.controller.is_none());
    assert!(project.scenario.is_none());
}

#[test]
fn scenario_section_parses() {
    let text = format!(
        "{MINIMAL}\
controller:
  kp: 2.0
  ki: 100.0
  kd: 0.0005
  v_min: -300.0
  v_max: 300.0
scenario:
  duration_s: 2.0
  drive:
    type: speed_reference
    rpm: 1750.0
  load_steps:
    - at_s: 1.5
      tlc: 20.0
    - at_s: 1.0
      tlc: 40.0
"
    );
    let project: ProjectConfig = serde_yaml::from_str(&text).unwrap();
    validate_project(&project).unwrap();

    let scenario = project.scenario.unwrap();
    assert_eq!(scenario.load_at(0.5), (0.0, 0.0));
    assert_eq!(scenario.load_at(1.0), (40.0, 0.0));
    assert_eq!(scenario.load_at(1.75), (20.0, 0.0));
}

#[test]
fn method_given_as_code() {
    let text = MINIMAL.replace("  h: 0.001\n", "  h: 0.001\n  method: \"2\"\n");
    let project: ProjectConfig = serde_yaml::from_str(&text).unwrap();
    validate_project(&project).unwrap();
    assert_eq!(
        dcm_project::parse_method(&project.simulation.method).unwrap(),
        dcm_sim::IntegrationMethod::RungeKutta4
    );
}

#[test]
fn unimplemented_method_is_rejected() {
    let text = MINIMAL.replace("  h: 0.001\n", "  h: 0.001\n  method: ADAMS\n");
    let project: ProjectConfig = serde_yaml::from_str(&text).unwrap();
    assert!(matches!(
        validate_project(&project),
        Err(ValidationError::InvalidMethod { .. })
    ));
}
