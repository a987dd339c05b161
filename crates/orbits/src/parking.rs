//! Parking orbit geometry: circular holding trajectories and the outer point they pass through.

use std::f64::consts::TAU;

use shuttle_core::vector::{Vector3, add, norm_xy, scale};

use crate::elements::{Body, ElementModel};
use crate::kepler::NumericalError;

/// In-plane radial and prograde tangent unit vectors of a body position.
fn planar_frame(position: &Vector3) -> (Vector3, Vector3) {
    let r = norm_xy(position);
    if r <= f64::EPSILON {
        return ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
    }
    let radial = [position[0] / r, position[1] / r, 0.0];
    let tangent = [-radial[1], radial[0], 0.0];
    (radial, tangent)
}

/// The body position pushed outward by its parking radius along the in-plane radial direction.
pub fn outer_point(model: &ElementModel, body: &Body, t: f64) -> Result<Vector3, NumericalError> {
    let center = model.position(body, t)?;
    let (radial, _) = planar_frame(&center);
    Ok(add(&center, &scale(&radial, body.parking_radius)))
}

/// Ship position on a circle of `radius` around `body`, at phase `2π·(t − anchor)/period`.
///
/// The phase is measured from the instantaneous radial direction, so the ship sits on the outer
/// point whenever `t − anchor` is a whole number of periods.
pub fn position_on_parking_orbit(
    model: &ElementModel,
    body: &Body,
    t: f64,
    anchor: f64,
    period: f64,
    radius: f64,
) -> Result<Vector3, NumericalError> {
    let center = model.position(body, t)?;
    let (radial, tangent) = planar_frame(&center);
    let phi = TAU * (t - anchor) / period;
    let offset = add(&scale(&radial, phi.cos()), &scale(&tangent, phi.sin()));
    Ok(add(&center, &scale(&offset, radius)))
}

/// Period closest to `nominal` that fits a whole number (at least one) of revolutions into `duration`.
pub fn fit_parking_period(duration: f64, nominal: f64) -> f64 {
    if !(duration > 0.0) {
        return nominal;
    }
    let revolutions = (duration / nominal).round().max(1.0);
    duration / revolutions
}
