//! Half-ellipse transfer legs.
//!
//! A leg sweeps exactly half an ellipse between two outer points. Raising legs start at
//! periapsis (`ν: 0 → π`), lowering legs at apoapsis (`ν: π → 2π`). The out-of-plane
//! coordinate is interpolated linearly between the endpoints instead of following a true
//! inclined conic.

use std::f64::consts::PI;

use serde::Serialize;
use shuttle_core::angle::{heading, unwrap};
use shuttle_core::vector::{Vector3, norm, norm_xy, sub};
use shuttle_orbits::{ElementModel, KeplerSolver, NumericalError, outer_point};
use thiserror::Error;

use super::timer::TransferTiming;
use crate::bodies::{BodyId, BodySystem};

/// Headings may dip by this much between samples and still count as advancing.
const HEADING_SLACK: f64 = 1e-12;

/// Which apse the leg departs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferKind {
    /// Arrival endpoint is farther out: depart at periapsis.
    Raising,
    /// Arrival endpoint is farther in: depart at apoapsis.
    Lowering,
}

#[derive(Debug, Error)]
pub enum TransferError {
    #[error(transparent)]
    Numerical(#[from] NumericalError),
    #[error("arrival time {t_arrival} does not follow departure time {t_depart}")]
    NonPositiveDuration { t_depart: f64, t_arrival: f64 },
    #[error("transfer endpoint lies on the attracting centre")]
    DegenerateRadius,
    #[error("transfer eccentricity {0} is not a bound ellipse")]
    Unbound(f64),
}

/// One transfer between the outer points of two bodies.
///
/// Endpoint positions are the outer points at the stored times, never re-derived.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferLeg {
    pub source: BodyId,
    pub target: BodyId,
    pub t_depart: f64,
    pub t_arrival: f64,
    pub departure_position: Vector3,
    pub arrival_position: Vector3,
    pub departure_velocity: Vector3,
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub semi_latus_rectum: f64,
    /// Chosen so the leg sweeps exactly π of mean anomaly between its two times (rad/day).
    pub mean_motion: f64,
    /// Planar heading of the departure point.
    pub departure_heading: f64,
    /// True (and mean) anomaly at departure: 0 for raising legs, π for lowering legs.
    pub start_anomaly: f64,
    pub kind: TransferKind,
}

impl TransferLeg {
    /// Build the half-ellipse leg for a converged timing, departing from `source`.
    pub fn half_ellipse(
        model: &ElementModel,
        system: &BodySystem,
        source: BodyId,
        timing: &TransferTiming,
    ) -> Result<Self, TransferError> {
        let target = source.other();
        let t_depart = timing.t_depart;
        let t_arrival = timing.t_arrival;
        if !(t_arrival > t_depart) {
            return Err(TransferError::NonPositiveDuration {
                t_depart,
                t_arrival,
            });
        }

        let departure_position = outer_point(model, system.body(source), t_depart)?;
        let arrival_position = outer_point(model, system.body(target), t_arrival)?;
        let r1 = norm_xy(&departure_position);
        let r2 = norm_xy(&arrival_position);
        if r1 <= f64::EPSILON || r2 <= f64::EPSILON {
            return Err(TransferError::DegenerateRadius);
        }

        let semi_major_axis = 0.5 * (r1 + r2);
        let eccentricity = (r2 - r1).abs() / (r1 + r2);
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(TransferError::Unbound(eccentricity));
        }
        let semi_latus_rectum = semi_major_axis * (1.0 - eccentricity * eccentricity);
        let (kind, start_anomaly) = if r2 >= r1 {
            (TransferKind::Raising, 0.0)
        } else {
            (TransferKind::Lowering, PI)
        };

        let duration = t_arrival - t_depart;
        let mean_motion = PI / duration;
        let departure_heading = heading(&departure_position);

        // At either apse the in-plane velocity is purely tangential with speed h / r1.
        let angular_momentum =
            mean_motion * semi_major_axis.powi(2) * (1.0 - eccentricity * eccentricity).sqrt();
        let speed = angular_momentum / r1;
        let (sin_t, cos_t) = departure_heading.sin_cos();
        let departure_velocity = [
            -speed * sin_t,
            speed * cos_t,
            (arrival_position[2] - departure_position[2]) / duration,
        ];

        Ok(Self {
            source,
            target,
            t_depart,
            t_arrival,
            departure_position,
            arrival_position,
            departure_velocity,
            semi_major_axis,
            eccentricity,
            semi_latus_rectum,
            mean_motion,
            departure_heading,
            start_anomaly,
            kind,
        })
    }

    pub fn duration(&self) -> f64 {
        self.t_arrival - self.t_depart
    }

    /// Elapsed time since departure, clamped to the leg.
    fn elapsed(&self, t: f64) -> f64 {
        (t - self.t_depart).clamp(0.0, self.duration())
    }

    /// Normalised progress in `[0, 1]`.
    pub fn progress(&self, t: f64) -> f64 {
        self.elapsed(t) / self.duration()
    }

    pub fn true_anomaly_at(&self, kepler: &KeplerSolver, t: f64) -> Result<f64, NumericalError> {
        let mean_anomaly = self.start_anomaly + self.mean_motion * self.elapsed(t);
        kepler.true_anomaly(mean_anomaly, self.eccentricity)
    }

    /// Cumulative planar heading: `θ_dep + (ν − ν_start)`.
    pub fn heading_at(&self, kepler: &KeplerSolver, t: f64) -> Result<f64, NumericalError> {
        Ok(self.departure_heading + self.true_anomaly_at(kepler, t)? - self.start_anomaly)
    }

    pub fn position_at(&self, kepler: &KeplerSolver, t: f64) -> Result<Vector3, NumericalError> {
        let nu = self.true_anomaly_at(kepler, t)?;
        let r = self.semi_latus_rectum / (1.0 + self.eccentricity * nu.cos());
        let theta = self.departure_heading + nu - self.start_anomaly;
        let z0 = self.departure_position[2];
        let z1 = self.arrival_position[2];
        let z = z0 + (z1 - z0) * self.progress(t);
        Ok([r * theta.cos(), r * theta.sin(), z])
    }

    /// Evenly spaced times from departure to arrival, both included.
    pub fn sample_times(&self, samples: usize) -> impl Iterator<Item = f64> + '_ {
        let samples = samples.max(2);
        let step = self.duration() / (samples - 1) as f64;
        (0..samples).map(move |i| {
            if i + 1 == samples {
                self.t_arrival
            } else {
                self.t_depart + i as f64 * step
            }
        })
    }

    /// Check that the planar heading of sampled positions never decreases once unwrapped.
    pub fn is_prograde(&self, kepler: &KeplerSolver, samples: usize) -> Result<bool, NumericalError> {
        let headings = self
            .sample_times(samples)
            .map(|t| self.position_at(kepler, t).map(|p| heading(&p)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(unwrap(&headings)
            .windows(2)
            .all(|pair| pair[1] - pair[0] >= -HEADING_SLACK))
    }

    /// Δv proxy: deviation of the departure velocity from the source body's own velocity.
    pub fn departure_delta_v(&self, source_velocity: &Vector3) -> f64 {
        norm(&sub(&self.departure_velocity, source_velocity))
    }
}
