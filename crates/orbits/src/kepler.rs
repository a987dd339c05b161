//! Kepler's equation `M = E − e·sin(E)`.

use thiserror::Error;

/// Root solver failures. Fatal to the single computation that hit them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericalError {
    #[error("eccentricity {0} is outside the bound-orbit range [0, 1)")]
    InvalidEccentricity(f64),
    #[error("non-finite mean anomaly {0}")]
    NonFiniteAnomaly(f64),
    #[error(
        "Kepler solve did not converge for M = {mean_anomaly}, e = {eccentricity} after {iterations} iterations"
    )]
    KeplerNoConvergence {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: usize,
    },
}

/// Newton iteration on Kepler's equation with a bisection fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolver {
    /// Absolute tolerance on the eccentric anomaly (radians).
    pub tolerance: f64,
    /// Iteration cap applied separately to the Newton and bisection stages.
    pub max_iterations: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 50,
        }
    }
}

impl KeplerSolver {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Eccentric anomaly on the same branch as `mean_anomaly` (no wrapping is applied).
    pub fn eccentric_anomaly(
        &self,
        mean_anomaly: f64,
        eccentricity: f64,
    ) -> Result<f64, NumericalError> {
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(NumericalError::InvalidEccentricity(eccentricity));
        }
        if !mean_anomaly.is_finite() {
            return Err(NumericalError::NonFiniteAnomaly(mean_anomaly));
        }
        let m = mean_anomaly;
        let e = eccentricity;
        if e == 0.0 {
            return Ok(m);
        }

        let mut ea = if e < 0.8 { m } else { m + e.copysign(m.sin()) };
        for _ in 0..self.max_iterations {
            let f = ea - e * ea.sin() - m;
            let fp = 1.0 - e * ea.cos();
            let delta = f / fp;
            ea -= delta;
            if !ea.is_finite() {
                break;
            }
            if delta.abs() < self.tolerance {
                return Ok(ea);
            }
        }

        // E always lies in [M − e, M + e].
        let mut lo = m - e;
        let mut hi = m + e;
        for _ in 0..self.max_iterations.max(64) {
            let mid = 0.5 * (lo + hi);
            if mid - e * mid.sin() - m > 0.0 {
                hi = mid;
            } else {
                lo = mid;
            }
            if hi - lo < self.tolerance {
                return Ok(0.5 * (lo + hi));
            }
        }

        Err(NumericalError::KeplerNoConvergence {
            mean_anomaly: m,
            eccentricity: e,
            iterations: self.max_iterations,
        })
    }

    /// True anomaly for a mean anomaly, continuous across whole revolutions of `E`.
    pub fn true_anomaly(&self, mean_anomaly: f64, eccentricity: f64) -> Result<f64, NumericalError> {
        let ea = self.eccentric_anomaly(mean_anomaly, eccentricity)?;
        Ok(true_from_eccentric(ea, eccentricity))
    }
}

/// `ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))`, shifted to the revolution `E` is on.
pub fn true_from_eccentric(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    use std::f64::consts::TAU;

    let revolutions = ((eccentric_anomaly + std::f64::consts::PI) / TAU).floor();
    let local = eccentric_anomaly - revolutions * TAU;
    let half = 0.5 * local;
    let nu = 2.0
        * ((1.0 + eccentricity).sqrt() * half.sin()).atan2((1.0 - eccentricity).sqrt() * half.cos());
    nu + revolutions * TAU
}
