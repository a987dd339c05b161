use std::f64::consts::PI;

use solar_shuttle::config::PlannerConfig;
use solar_shuttle::impulsive::{LambertSolverError, lambert_solve};
use solar_shuttle::primitives::constants::MU_SUN_AU3_DAY2 as MU;
use solar_shuttle::primitives::vector::{dot, norm};
use solar_shuttle::transfer::BodySystem;
use solar_shuttle::transfer::bodies::model_from_config;

#[test]
fn lambert_quarter_orbit_matches_circular_velocity() {
    let r1 = [1.0, 0.0, 0.0];
    let r2 = [0.0, 1.0, 0.0];
    let tof = (PI / 2.0) * (1.0 / MU).sqrt();

    let (v1, v2) = lambert_solve(r1, r2, tof, MU, true).expect("lambert solve");

    let expected_speed = MU.sqrt();
    assert!(
        dot(&v1, &[0.0, 1.0, 0.0]) / norm(&v1) > 0.99,
        "expected prograde tangential velocity at departure: {:?}",
        v1
    );
    assert!(
        dot(&v2, &[-1.0, 0.0, 0.0]) / norm(&v2) > 0.99,
        "expected prograde tangential velocity at arrival: {:?}",
        v2
    );
    assert!((norm(&v1) - expected_speed).abs() < 1e-4);
    assert!((norm(&v2) - expected_speed).abs() < 1e-4);
}

#[test]
fn lambert_retrograde_branch_goes_the_long_way() {
    let r1 = [1.0, 0.0, 0.0];
    let r2 = [0.0, 1.0, 0.0];
    let tof = (3.0 * PI / 2.0) * (1.0 / MU).sqrt();

    let (v1, _) = lambert_solve(r1, r2, tof, MU, false).expect("lambert solve");
    assert!(v1[1] < 0.0, "expected clockwise departure: {:?}", v1);
    assert!((norm(&v1) - MU.sqrt()).abs() < 1e-3);
}

#[test]
fn lambert_rejects_degenerate_geometry() {
    let r1 = [1.0, 0.0, 0.0];
    assert!(matches!(
        lambert_solve(r1, [0.0, 1.5, 0.0], 0.0, MU, true),
        Err(LambertSolverError::NonPositiveTimeOfFlight(_))
    ));
    assert!(matches!(
        lambert_solve(r1, [0.0, 1.5, 0.0], -10.0, MU, true),
        Err(LambertSolverError::NonPositiveTimeOfFlight(_))
    ));
    assert!(matches!(
        lambert_solve(r1, [0.0, 0.0, 0.0], 100.0, MU, true),
        Err(LambertSolverError::ZeroRadius)
    ));
    assert!(matches!(
        lambert_solve(r1, [-1.5, 0.0, 0.0], 200.0, MU, true),
        Err(LambertSolverError::AntiParallel)
    ));
}

#[test]
fn lambert_earth_to_mars_is_prograde_and_plausible() {
    let config = PlannerConfig::default();
    let system = BodySystem::from_config(&config);
    let model = model_from_config(&config.solver);
    let depart = model.state(&system.source, 477.0).unwrap();
    let arrive = model.state(&system.target, 677.0).unwrap();

    let (v1, v2) = lambert_solve(depart.position, arrive.position, 200.0, MU, true)
        .expect("lambert solve");
    let h = depart.position[0] * v1[1] - depart.position[1] * v1[0];
    assert!(h > 0.0, "transfer must circulate counter-clockwise");
    for v in [v1, v2] {
        let speed = norm(&v);
        assert!((0.005..0.05).contains(&speed), "speed = {speed} AU/day");
    }
}
