//! Orbital element model: heliocentric position and velocity from fixed elements.

use std::f64::consts::TAU;

use shuttle_core::units::deg_to_rad;
use shuttle_core::vector::{Vector3, scale, sub};

use crate::kepler::{KeplerSolver, NumericalError};

/// Classical elements of a body's heliocentric orbit. Angles in radians, times in days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub ascending_node: f64,
    pub argument_periapsis: f64,
    /// Mean anomaly at `epoch`.
    pub mean_anomaly: f64,
    pub period: f64,
    pub epoch: f64,
}

impl OrbitalElements {
    /// Build elements from degree-valued angles.
    #[allow(clippy::too_many_arguments)]
    pub fn from_degrees(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
        ascending_node_deg: f64,
        argument_periapsis_deg: f64,
        mean_anomaly_deg: f64,
        period: f64,
        epoch: f64,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination: deg_to_rad(inclination_deg),
            ascending_node: deg_to_rad(ascending_node_deg),
            argument_periapsis: deg_to_rad(argument_periapsis_deg),
            mean_anomaly: deg_to_rad(mean_anomaly_deg),
            period,
            epoch,
        }
    }

    /// Mean motion (rad/day) from the stated period.
    pub fn mean_motion(&self) -> f64 {
        TAU / self.period
    }

    /// Mean anomaly at `t`, reduced to `[0, 2π)`.
    pub fn mean_anomaly_at(&self, t: f64) -> f64 {
        (self.mean_anomaly + self.mean_motion() * (t - self.epoch)).rem_euclid(TAU)
    }

    /// Rotate a perifocal (x toward periapsis) vector into the reference frame.
    fn perifocal_to_reference(&self, x: f64, y: f64) -> Vector3 {
        let (so, co) = self.ascending_node.sin_cos();
        let (si, ci) = self.inclination.sin_cos();
        let (sw, cw) = self.argument_periapsis.sin_cos();

        let px = co * cw - so * sw * ci;
        let py = so * cw + co * sw * ci;
        let pz = sw * si;
        let qx = -co * sw - so * cw * ci;
        let qy = -so * sw + co * cw * ci;
        let qz = cw * si;

        [px * x + qx * y, py * x + qy * y, pz * x + qz * y]
    }
}

/// A body the shuttle travels between.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub elements: OrbitalElements,
    pub visual_radius: f64,
    pub parking_radius: f64,
    /// Nominal parking period; the schedule fits the actual one to each phase.
    pub parking_period: f64,
}

/// Position (AU) and velocity (AU/day) of a body at an instant. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub time: f64,
    pub position: Vector3,
    pub velocity: Vector3,
}

/// Deterministic element propagation shared by every planner component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementModel {
    pub kepler: KeplerSolver,
    /// Half-width of the central difference used for velocities (days).
    pub finite_difference_step: f64,
}

impl Default for ElementModel {
    fn default() -> Self {
        Self {
            kepler: KeplerSolver::default(),
            finite_difference_step: 1e-3,
        }
    }
}

impl ElementModel {
    pub fn new(kepler: KeplerSolver, finite_difference_step: f64) -> Self {
        Self {
            kepler,
            finite_difference_step,
        }
    }

    /// Heliocentric position of `body` at `t`.
    pub fn position(&self, body: &Body, t: f64) -> Result<Vector3, NumericalError> {
        self.position_from_elements(&body.elements, t)
    }

    pub fn position_from_elements(
        &self,
        elements: &OrbitalElements,
        t: f64,
    ) -> Result<Vector3, NumericalError> {
        let e = elements.eccentricity;
        let ea = self
            .kepler
            .eccentric_anomaly(elements.mean_anomaly_at(t), e)?;
        let a = elements.semi_major_axis;
        let x = a * (ea.cos() - e);
        let y = a * (1.0 - e * e).sqrt() * ea.sin();
        Ok(elements.perifocal_to_reference(x, y))
    }

    /// Velocity of `body` at `t` by central finite difference.
    pub fn velocity(&self, body: &Body, t: f64) -> Result<Vector3, NumericalError> {
        let h = self.finite_difference_step;
        let ahead = self.position(body, t + h)?;
        let behind = self.position(body, t - h)?;
        Ok(scale(&sub(&ahead, &behind), 0.5 / h))
    }

    pub fn state(&self, body: &Body, t: f64) -> Result<BodyState, NumericalError> {
        Ok(BodyState {
            time: t,
            position: self.position(body, t)?,
            velocity: self.velocity(body, t)?,
        })
    }
}
