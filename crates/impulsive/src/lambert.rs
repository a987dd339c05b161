//! General two-point boundary value solve between two heliocentric positions.

use lambert_bate::get_velocities;
use shuttle_core::vector::{Vector3, cross, dot, norm};
use thiserror::Error;

/// Anti-parallel endpoints closer than this (in `1 + cos Δν`) leave the transfer plane undefined.
const ANTI_PARALLEL_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Error)]
pub enum LambertSolverError {
    #[error("time of flight must be positive (got {0})")]
    NonPositiveTimeOfFlight(f64),
    #[error("endpoint at the attracting centre")]
    ZeroRadius,
    #[error("endpoints are anti-parallel; the transfer plane is ambiguous")]
    AntiParallel,
    #[error("lambert solver failed: {0}")]
    Failure(String),
}

/// Departure and arrival velocities of the conic from `r1` to `r2` in `time_of_flight`.
///
/// `prograde` selects the branch sweeping counter-clockwise about +z: the short way when the
/// endpoints already turn that direction, the long way otherwise.
pub fn solve(
    r1: Vector3,
    r2: Vector3,
    time_of_flight: f64,
    mu: f64,
    prograde: bool,
) -> Result<(Vector3, Vector3), LambertSolverError> {
    if !(time_of_flight > 0.0) {
        return Err(LambertSolverError::NonPositiveTimeOfFlight(time_of_flight));
    }
    let r1_mag = norm(&r1);
    let r2_mag = norm(&r2);
    if r1_mag <= f64::EPSILON || r2_mag <= f64::EPSILON {
        return Err(LambertSolverError::ZeroRadius);
    }
    let cos_dnu = (dot(&r1, &r2) / (r1_mag * r2_mag)).clamp(-1.0, 1.0);
    if 1.0 + cos_dnu < ANTI_PARALLEL_TOLERANCE {
        return Err(LambertSolverError::AntiParallel);
    }

    let counter_clockwise = cross(&r1, &r2)[2] >= 0.0;
    let short = counter_clockwise == prograde;
    get_velocities(r1, r2, time_of_flight, mu, short, 1e-8, 500)
        .map_err(|e| LambertSolverError::Failure(format!("{e:?}")))
}
