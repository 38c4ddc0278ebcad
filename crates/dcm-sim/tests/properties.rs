//! Property tests over random input sequences and initial states.

use dcm_sim::{IntegrationMethod, MotorEngine, MotorInputs, MotorParams, MotorState, ShuntMotor};
use proptest::prelude::*;

fn reference_params() -> MotorParams {
    MotorParams {
        r: 1.086,
        l: 0.01216,
        j: 0.04251,
        b: 0.003406,
        k1: 1.07633,
        k2: 1.07633,
    }
}

fn method_strategy() -> impl Strategy<Value = IntegrationMethod> {
    prop_oneof![
        Just(IntegrationMethod::ForwardEuler),
        Just(IntegrationMethod::Trapezoidal),
        Just(IntegrationMethod::RungeKutta4),
    ]
}

fn inputs_strategy() -> impl Strategy<Value = MotorInputs> {
    (-300.0_f64..300.0, 0.0_f64..50.0, 0.0_f64..0.1)
        .prop_map(|(vt, tlc, tlw)| MotorInputs::new(vt, tlc, tlw))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn replay_is_deterministic(
        method in method_strategy(),
        inputs in prop::collection::vec(inputs_strategy(), 1..200),
    ) {
        let mut a = MotorEngine::new(reference_params()).unwrap();
        let mut b = MotorEngine::new(reference_params()).unwrap();
        a.configure(1e-3, method).unwrap();
        b.configure(1e-3, method).unwrap();

        for u in inputs {
            let sa = a.step(u).unwrap();
            let sb = b.step(u).unwrap();
            prop_assert_eq!(sa.ia.to_bits(), sb.ia.to_bits());
            prop_assert_eq!(sa.w.to_bits(), sb.w.to_bits());
        }
    }

    #[test]
    fn unforced_motor_dissipates_energy(ia0 in -100.0_f64..100.0, w0 in -300.0_f64..300.0) {
        let p = reference_params();
        let motor = ShuntMotor::new(p).unwrap();
        let mut engine = MotorEngine::with_initial_state(p, MotorState::new(ia0, w0)).unwrap();
        engine.configure(1e-5, IntegrationMethod::ForwardEuler).unwrap();

        let mut previous = motor.stored_energy(&engine.state());
        for _ in 0..500 {
            let s = engine.step(MotorInputs::default()).unwrap();
            let e = motor.stored_energy(&s);
            prop_assert!(e <= previous * (1.0 + 1e-12) + 1e-300);
            previous = e;
        }
    }

    #[test]
    fn states_stay_finite_under_bounded_inputs(
        method in method_strategy(),
        inputs in prop::collection::vec(inputs_strategy(), 1..100),
    ) {
        let mut engine = MotorEngine::new(reference_params()).unwrap();
        engine.configure(1e-3, method).unwrap();
        for u in inputs {
            let s = engine.step(u).unwrap();
            prop_assert!(s.is_finite());
        }
    }
}
