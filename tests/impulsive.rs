use solar_shuttle::impulsive::transfers::hohmann;
use solar_shuttle::primitives::constants::MU_SUN_AU3_DAY2 as MU;
use solar_shuttle::primitives::units::au_per_day_to_km_s;

#[test]
fn hohmann_symmetry_and_time_match() {
    let h12 = hohmann(1.0, 1.524, MU);
    let h21 = hohmann(1.524, 1.0, MU);

    // Total dv symmetric under exchange of r1 and r2
    assert!((h12.dv_total - h21.dv_total).abs() < 1e-12);
    assert!((h12.tof - h21.tof).abs() < 1e-9);

    // Outward transfer burns prograde, inward transfer retro
    assert!(h12.dv1 > 0.0);
    assert!(h21.dv1 < 0.0);
}

#[test]
fn hohmann_earth_mars_reasonable_numbers() {
    let h = hohmann(1.0, 1.523679, MU);
    let dv_km_s = au_per_day_to_km_s(h.dv_total);
    assert!((dv_km_s - 5.6).abs() < 0.7, "dv_total = {dv_km_s} km/s");
    assert!((250.0..=270.0).contains(&h.tof), "tof_days = {}", h.tof);
}

#[test]
fn hohmann_between_parking_endpoints_is_longer() {
    let bare = hohmann(1.0, 1.524, MU);
    let parked = hohmann(1.2, 1.704, MU);
    assert!(parked.tof > bare.tof);
    assert!(parked.dv_total < bare.dv_total);
}
