//! Launch window search: coarse phase scan, wrap-aware bracketing, bisection.

use std::f64::consts::PI;

use shuttle_core::angle::{heading, wrap_pi};
use shuttle_orbits::{Body, ElementModel};
use thiserror::Error;

use super::timer::{TimerError, TransferTimer, TransferTiming};

/// A departure time whose half-ellipse lands on the target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchWindow {
    pub t_launch: f64,
    pub timing: TransferTiming,
    /// Residual wrapped phase error at `t_launch` (radians).
    pub phase_error: f64,
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("no launch window from {source_name} to {target_name} in [{earliest:.3}, {latest:.3}]")]
    NotFound {
        source_name: String,
        target_name: String,
        earliest: f64,
        latest: f64,
    },
    #[error("invalid search interval starting at {earliest} with horizon {horizon}")]
    InvalidInterval { earliest: f64, horizon: f64 },
}

/// One coarse-scan evaluation, carrying both angle channels.
#[derive(Debug, Clone, Copy)]
struct PhaseSample {
    t: f64,
    /// Phase error wrapped to `[-π, π)`.
    wrapped: f64,
    /// Raw heading difference, kept to extend the unwrapped channel.
    raw: f64,
    /// Cumulative (never wrapped) phase error along the scan.
    unwrapped: f64,
}

/// Phase error of a candidate departure and the timing it was computed with.
#[derive(Debug, Clone, Copy)]
pub struct PhaseEvaluation {
    pub wrapped: f64,
    pub raw: f64,
    pub timing: TransferTiming,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchWindowSearch {
    pub timer: TransferTimer,
    /// Coarse scan granularity (days).
    pub coarse_step: f64,
    /// Bisection stops once the bracket is narrower than this (days).
    pub tolerance: f64,
    pub max_bisections: usize,
}

impl LaunchWindowSearch {
    pub fn new(timer: TransferTimer, coarse_step: f64, tolerance: f64, max_bisections: usize) -> Self {
        Self {
            timer,
            coarse_step,
            tolerance,
            max_bisections,
        }
    }

    /// `θ_target(t + T_half(t)) − θ_source(t) − π`, wrapped and raw.
    ///
    /// The timer always starts from the Hohmann guess so the error is a pure function of `t`.
    pub fn phase_error(
        &self,
        model: &ElementModel,
        source: &Body,
        target: &Body,
        t: f64,
    ) -> Result<PhaseEvaluation, TimerError> {
        let guess = self.timer.nominal_guess(source, target);
        let timing = self.timer.solve(model, source, target, t, guess)?;
        let theta_source = heading(&model.position(source, t)?);
        let theta_target = heading(&model.position(target, timing.t_arrival)?);
        let raw = theta_target - theta_source - PI;
        Ok(PhaseEvaluation {
            wrapped: wrap_pi(raw),
            raw,
            timing,
        })
    }

    /// First departure in `[earliest, earliest + horizon]` whose transfer phase-matches the target.
    pub fn find_next_window(
        &self,
        model: &ElementModel,
        source: &Body,
        target: &Body,
        earliest: f64,
        horizon: f64,
    ) -> Result<LaunchWindow, WindowError> {
        if !(earliest.is_finite() && horizon.is_finite() && horizon > 0.0) {
            return Err(WindowError::InvalidInterval { earliest, horizon });
        }
        let latest = earliest + horizon;
        let steps = (horizon / self.coarse_step).ceil() as usize;

        let mut previous: Option<PhaseSample> = None;
        for k in 0..=steps {
            let t = (earliest + k as f64 * self.coarse_step).min(latest);
            let evaluation = match self.phase_error(model, source, target, t) {
                Ok(evaluation) => evaluation,
                Err(err) => {
                    log::debug!("phase scan sample at t = {t:.3} rejected: {err}");
                    previous = None;
                    continue;
                }
            };

            let unwrapped = match previous {
                Some(prev) => prev.unwrapped + wrap_pi(evaluation.raw - prev.raw),
                None => evaluation.raw,
            };
            let sample = PhaseSample {
                t,
                wrapped: evaluation.wrapped,
                raw: evaluation.raw,
                unwrapped,
            };

            if sample.wrapped == 0.0 {
                return Ok(LaunchWindow {
                    t_launch: t,
                    timing: evaluation.timing,
                    phase_error: 0.0,
                });
            }

            if let Some(prev) = previous {
                if is_root_bracket(&prev, &sample) {
                    match self.refine(model, source, target, &prev, &sample) {
                        Ok(window) => return Ok(window),
                        Err(err) => {
                            log::debug!(
                                "bracket [{:.3}, {:.3}] abandoned: {err}",
                                prev.t,
                                sample.t
                            );
                        }
                    }
                }
            }
            previous = Some(sample);
        }

        Err(WindowError::NotFound {
            source_name: source.name.clone(),
            target_name: target.name.clone(),
            earliest,
            latest,
        })
    }

    fn refine(
        &self,
        model: &ElementModel,
        source: &Body,
        target: &Body,
        left: &PhaseSample,
        right: &PhaseSample,
    ) -> Result<LaunchWindow, TimerError> {
        let mut lo = left.t;
        let mut hi = right.t;
        let mut f_lo = left.wrapped;

        for _ in 0..self.max_bisections {
            if hi - lo < self.tolerance {
                break;
            }
            let mid = 0.5 * (lo + hi);
            let f_mid = self.phase_error(model, source, target, mid)?.wrapped;
            if f_mid == 0.0 {
                lo = mid;
                hi = mid;
                break;
            }
            if f_mid.signum() == f_lo.signum() {
                lo = mid;
                f_lo = f_mid;
            } else {
                hi = mid;
            }
        }

        let t_launch = 0.5 * (lo + hi);
        let evaluation = self.phase_error(model, source, target, t_launch)?;
        Ok(LaunchWindow {
            t_launch,
            timing: evaluation.timing,
            phase_error: evaluation.wrapped,
        })
    }
}

/// A sign change is a root only when the wrapped and unwrapped channels moved together;
/// a wrap artifact makes the wrapped channel jump by ~2π while the unwrapped one barely moves.
fn is_root_bracket(prev: &PhaseSample, next: &PhaseSample) -> bool {
    if prev.wrapped.signum() == next.wrapped.signum() {
        return false;
    }
    let wrapped_step = next.wrapped - prev.wrapped;
    let unwrapped_step = next.unwrapped - prev.unwrapped;
    (wrapped_step - unwrapped_step).abs() < PI
}
