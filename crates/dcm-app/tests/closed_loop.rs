//! The bundled speed-control scenario: 1750 rpm reference, 40 N·m load from 1 s.

use dcm_app::run_scenario;
use dcm_core::units::rpm_to_rad_s;
use dcm_project::default_config;

#[test]
fn speed_loop_holds_reference_through_load_step() {
    let project = default_config();
    let logbook = run_scenario(&project).unwrap();
    let records = logbook.records();
    let reference = rpm_to_rad_s(1750.0);

    assert_eq!(records.len(), 2000);
    assert_eq!(records[0].t, 0.0);

    let before_load = &records[999];
    assert_eq!(before_load.tlc, 0.0);
    assert!((before_load.w - reference).abs() < 1e-3, "w = {}", before_load.w);

    // Load sags the speed before the integral action recovers it.
    let sag = records[1000..]
        .iter()
        .map(|r| r.w)
        .fold(f64::INFINITY, f64::min);
    assert!(sag < reference - 5.0, "minimum speed after load {sag}");

    let end = records[records.len() - 1];
    assert_eq!(end.tlc, 40.0);
    assert!((end.w - reference).abs() < 1e-3, "w = {}", end.w);

    // Armature current settles where torque balances load plus friction.
    let p = project.motor;
    let ia_expected = (40.0 + p.b * reference) / p.k1;
    assert!((end.ia - ia_expected).abs() < 0.05, "ia = {}", end.ia);
}

#[test]
fn higher_order_methods_track_the_same_reference() {
    for method in ["trapezoidal", "rk4"] {
        let mut project = default_config();
        project.simulation.method = method.to_string();
        let logbook = run_scenario(&project).unwrap();
        let end = logbook.last().unwrap();
        assert!(
            (end.w - rpm_to_rad_s(1750.0)).abs() < 1e-2,
            "{method}: w = {}",
            end.w
        );
    }
}
