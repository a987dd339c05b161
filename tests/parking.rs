use solar_shuttle::config::BodyConfig;
use solar_shuttle::orbits::{ElementModel, fit_parking_period, outer_point, position_on_parking_orbit};
use solar_shuttle::primitives::angle::heading;
use solar_shuttle::primitives::vector::distance;
use solar_shuttle::transfer::bodies::body_from_config;

#[test]
fn fitted_period_divides_the_stay() {
    assert_eq!(fit_parking_period(100.0, 20.0), 20.0);
    let fitted = fit_parking_period(110.0, 20.0);
    assert!((fitted - 110.0 / 6.0).abs() < 1e-12);
    // Shorter than one nominal revolution: a single lap fills the stay.
    assert_eq!(fit_parking_period(5.0, 20.0), 5.0);
    assert_eq!(fit_parking_period(0.0, 20.0), 20.0);
    assert_eq!(fit_parking_period(-3.0, 25.0), 25.0);
}

#[test]
fn outer_point_sits_radially_outside_the_body() {
    let model = ElementModel::default();
    for config in [BodyConfig::earth(), BodyConfig::mars()] {
        let body = body_from_config(&config);
        for &t in &[0.0, 87.5, 333.3, 900.0] {
            let center = model.position(&body, t).unwrap();
            let outer = outer_point(&model, &body, t).unwrap();
            assert!((distance(&center, &outer) - body.parking_radius).abs() < 1e-12);
            assert!((heading(&center) - heading(&outer)).abs() < 1e-12);
            assert_eq!(center[2], outer[2]);
        }
    }
}

#[test]
fn parking_orbit_returns_to_the_outer_point_each_period() {
    let model = ElementModel::default();
    let body = body_from_config(&BodyConfig::mars());
    let anchor = 40.0;
    let period = 24.5;
    for lap in 0..4 {
        let t = anchor + lap as f64 * period;
        let ship = position_on_parking_orbit(&model, &body, t, anchor, period, body.parking_radius)
            .unwrap();
        let outer = outer_point(&model, &body, t).unwrap();
        assert!(distance(&ship, &outer) < 1e-12, "lap {lap}");
    }

    for i in 0..50 {
        let t = anchor + i as f64 * 1.7;
        let ship = position_on_parking_orbit(&model, &body, t, anchor, period, body.parking_radius)
            .unwrap();
        let center = model.position(&body, t).unwrap();
        assert!((distance(&ship, &center) - body.parking_radius).abs() < 1e-12);
    }
}
