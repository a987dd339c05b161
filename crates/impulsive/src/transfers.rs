//! Circular-orbit transfer estimates used to seed the shuttle's transfer timing.

/// Hohmann transfer between circular heliocentric orbits of radii `r1` and `r2` (AU).
/// Speeds are AU/day and `tof` is days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HohmannResult {
    /// Departure burn, negative on a lowering (Mars to Earth) leg.
    pub dv1: f64,
    /// Arrival burn, negative on a lowering leg.
    pub dv2: f64,
    pub dv_total: f64,
    /// Half the transfer ellipse period.
    pub tof: f64,
}

/// Half-period transfer between the two radii around a body with parameter `mu` (AU³/day²).
///
/// `tof` is the initial guess for the fixed-point transfer timer.
pub fn hohmann(r1: f64, r2: f64, mu: f64) -> HohmannResult {
    debug_assert!(r1 > 0.0 && r2 > 0.0 && mu > 0.0);

    let v1 = (mu / r1).sqrt();
    let v2 = (mu / r2).sqrt();
    let a_t = 0.5 * (r1 + r2);
    let tof = std::f64::consts::PI * (a_t.powi(3) / mu).sqrt();

    let v_t1 = (mu * (2.0 / r1 - 1.0 / a_t)).sqrt();
    let v_t2 = (mu * (2.0 / r2 - 1.0 / a_t)).sqrt();

    let dv1 = v_t1 - v1;
    let dv2 = v2 - v_t2;

    HohmannResult {
        dv1,
        dv2,
        dv_total: dv1.abs() + dv2.abs(),
        tof,
    }
}
