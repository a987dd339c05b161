use std::f64::consts::{PI, TAU};

use solar_shuttle::config::BodyConfig;
use solar_shuttle::orbits::{ElementModel, KeplerSolver, NumericalError};
use solar_shuttle::primitives::constants::MU_SUN_AU3_DAY2 as MU;
use solar_shuttle::primitives::vector::{norm, norm_xy};
use solar_shuttle::transfer::bodies::body_from_config;

#[test]
fn eccentric_anomaly_satisfies_keplers_equation() {
    let solver = KeplerSolver::default();
    for &e in &[0.0, 0.0167, 0.0934, 0.5, 0.9, 0.99] {
        for i in 0..=24 {
            let m = -PI + TAU * i as f64 / 24.0;
            let ea = solver.eccentric_anomaly(m, e).expect("kepler solve");
            let residual = ea - e * ea.sin() - m;
            assert!(
                residual.abs() < 1e-9,
                "e = {e}, M = {m}: residual {residual}"
            );
        }
    }
}

#[test]
fn circular_orbit_anomalies_are_identical() {
    let solver = KeplerSolver::default();
    assert_eq!(solver.eccentric_anomaly(1.234, 0.0).unwrap(), 1.234);
    assert!((solver.true_anomaly(1.234, 0.0).unwrap() - 1.234).abs() < 1e-12);
}

#[test]
fn true_anomaly_is_continuous_across_revolutions() {
    let solver = KeplerSolver::default();
    let e = 0.3;
    for &m in &[0.2, 1.5, 3.0, 3.3, 5.9] {
        let base = solver.true_anomaly(m, e).unwrap();
        let next = solver.true_anomaly(m + TAU, e).unwrap();
        assert!((next - base - TAU).abs() < 1e-9, "M = {m}: {base} vs {next}");
    }

    let mut previous = solver.true_anomaly(0.0, e).unwrap();
    for i in 1..=400 {
        let m = 4.0 * PI * i as f64 / 400.0;
        let nu = solver.true_anomaly(m, e).unwrap();
        assert!(nu > previous, "true anomaly must increase with mean anomaly");
        previous = nu;
    }
    assert!((previous - 4.0 * PI).abs() < 1e-9);
}

#[test]
fn invalid_inputs_are_reported() {
    let solver = KeplerSolver::default();
    assert!(matches!(
        solver.eccentric_anomaly(1.0, 1.0),
        Err(NumericalError::InvalidEccentricity(_))
    ));
    assert!(matches!(
        solver.eccentric_anomaly(1.0, -0.1),
        Err(NumericalError::InvalidEccentricity(_))
    ));
    assert!(matches!(
        solver.eccentric_anomaly(f64::NAN, 0.1),
        Err(NumericalError::NonFiniteAnomaly(_))
    ));
}

#[test]
fn earth_stays_between_perihelion_and_aphelion() {
    let earth = body_from_config(&BodyConfig::earth());
    let model = ElementModel::default();
    for day in 0..366 {
        let p = model.position(&earth, day as f64).unwrap();
        let r = norm(&p);
        assert!((0.9833 - 1e-6..=1.0167 + 1e-6).contains(&r), "day {day}: r = {r}");
        assert!(p[2].abs() < 1e-12, "Earth lies in the reference plane");
    }
}

#[test]
fn positions_repeat_after_one_period() {
    let model = ElementModel::default();
    for body in [BodyConfig::earth(), BodyConfig::mars()] {
        let body = body_from_config(&body);
        let p0 = model.position(&body, 123.4).unwrap();
        let p1 = model.position(&body, 123.4 + body.elements.period).unwrap();
        for k in 0..3 {
            assert!((p0[k] - p1[k]).abs() < 1e-9, "{}: {p0:?} vs {p1:?}", body.name);
        }
    }
}

#[test]
fn mars_leaves_the_reference_plane() {
    let mars = body_from_config(&BodyConfig::mars());
    let model = ElementModel::default();
    let max_z = (0..687)
        .map(|day| model.position(&mars, day as f64).unwrap()[2].abs())
        .fold(0.0_f64, f64::max);
    let expected = 1.524 * (1.0 + 0.0934) * 1.85_f64.to_radians().sin();
    assert!(max_z > 0.03 && max_z <= expected + 1e-6, "max |z| = {max_z}");
}

#[test]
fn finite_difference_velocity_matches_vis_viva() {
    let model = ElementModel::default();
    for body in [BodyConfig::earth(), BodyConfig::mars()] {
        let body = body_from_config(&body);
        let a = body.elements.semi_major_axis;
        // The stated period fixes the effective gravitational parameter of each orbit.
        let mu = 4.0 * PI * PI * a.powi(3) / body.elements.period.powi(2);
        for &t in &[0.0, 100.0, 250.0, 500.0] {
            let state = model.state(&body, t).unwrap();
            let r = norm(&state.position);
            let expected = (mu * (2.0 / r - 1.0 / a)).sqrt();
            let speed = norm(&state.velocity);
            assert!(
                (speed - expected).abs() / expected < 1e-5,
                "{} at t = {t}: {speed} vs {expected}",
                body.name
            );
        }
    }
    assert!((MU - 4.0 * PI * PI / 365.25_f64.powi(2)).abs() / MU < 1e-3);
}

#[test]
fn in_plane_radius_ignores_height() {
    assert_eq!(norm_xy(&[3.0, 4.0, 12.0]), 5.0);
}
