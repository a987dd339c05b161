//! Self-consistent half-transfer duration.
//!
//! The half-ellipse duration depends on the arrival radius, which depends on the arrival time,
//! which depends on the duration. A fixed-point iteration settles the loop.

use std::f64::consts::PI;

use shuttle_core::vector::norm_xy;
use shuttle_impulsive::transfers::hohmann;
use shuttle_orbits::{Body, ElementModel, NumericalError, outer_point};
use thiserror::Error;

/// Converged timing of a half-ellipse transfer departing at `t_depart`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferTiming {
    pub t_depart: f64,
    pub t_arrival: f64,
    pub t_half: f64,
    /// In-plane radius of the departure outer point.
    pub r_depart: f64,
    /// In-plane radius of the arrival outer point at `t_arrival`.
    pub r_arrive: f64,
    pub iterations: usize,
}

#[derive(Debug, Error)]
pub enum TimerError {
    #[error(transparent)]
    Numerical(#[from] NumericalError),
    #[error(
        "transfer timer did not settle for departure at t = {t_depart:.6} after {iterations} iterations (last step {last_step:.3e} days)"
    )]
    NoConvergence {
        t_depart: f64,
        iterations: usize,
        last_step: f64,
    },
    #[error("non-physical half-transfer duration {0}")]
    NonPhysical(f64),
}

/// Fixed-point solver for the half-transfer duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferTimer {
    pub mu: f64,
    /// Convergence threshold on successive durations (days).
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl TransferTimer {
    pub fn new(mu: f64, tolerance: f64, max_iterations: usize) -> Self {
        Self {
            mu,
            tolerance,
            max_iterations,
        }
    }

    /// Half the period of an ellipse with semi-major axis `a`.
    pub fn half_period(&self, a: f64) -> f64 {
        PI * (a.powi(3) / self.mu).sqrt()
    }

    /// Hohmann time of flight between the mean endpoint radii; a starting guess for [`solve`](Self::solve).
    pub fn nominal_guess(&self, source: &Body, target: &Body) -> f64 {
        let r1 = source.elements.semi_major_axis + source.parking_radius;
        let r2 = target.elements.semi_major_axis + target.parking_radius;
        hohmann(r1, r2, self.mu).tof
    }

    /// Settle `T = π·sqrt(a³/μ)` with `a` the mean of the departure and arrival endpoint radii.
    pub fn solve(
        &self,
        model: &ElementModel,
        source: &Body,
        target: &Body,
        t_depart: f64,
        initial_guess: f64,
    ) -> Result<TransferTiming, TimerError> {
        if !(initial_guess.is_finite() && initial_guess > 0.0) {
            return Err(TimerError::NonPhysical(initial_guess));
        }
        let r_depart = endpoint_radius(model, source, t_depart)?;

        let mut t_half = initial_guess;
        let mut last_step = f64::INFINITY;
        for iteration in 1..=self.max_iterations {
            let r_arrive = endpoint_radius(model, target, t_depart + t_half)?;
            let next = self.half_period(0.5 * (r_depart + r_arrive));
            if !(next.is_finite() && next > 0.0) {
                return Err(TimerError::NonPhysical(next));
            }
            last_step = (next - t_half).abs();
            t_half = next;
            if last_step < self.tolerance {
                let t_arrival = t_depart + t_half;
                return Ok(TransferTiming {
                    t_depart,
                    t_arrival,
                    t_half,
                    r_depart,
                    r_arrive: endpoint_radius(model, target, t_arrival)?,
                    iterations: iteration,
                });
            }
        }

        Err(TimerError::NoConvergence {
            t_depart,
            iterations: self.max_iterations,
            last_step,
        })
    }
}

/// In-plane radius of a body's outer point, the radius a transfer actually starts or ends at.
pub fn endpoint_radius(model: &ElementModel, body: &Body, t: f64) -> Result<f64, NumericalError> {
    Ok(norm_xy(&outer_point(model, body, t)?))
}
