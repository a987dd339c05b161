//! Collision clearance of transfer legs against both bodies.

use shuttle_core::vector::distance;
use shuttle_orbits::{Body, ElementModel, NumericalError};

use super::leg::TransferLeg;
use crate::bodies::BodySystem;

/// Closest approaches found while sampling a leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearanceReport {
    pub min_source_distance: f64,
    pub min_target_distance: f64,
    pub source_exclusion: f64,
    pub target_exclusion: f64,
    /// Time of the sample with the smallest margin over its exclusion radius.
    pub worst_time: f64,
    pub samples: usize,
}

impl ClearanceReport {
    pub fn is_clear(&self) -> bool {
        self.min_source_distance >= self.source_exclusion
            && self.min_target_distance >= self.target_exclusion
    }
}

/// Rejects legs that bring the ship inside `visual + margin + ship` of either body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearanceChecker {
    pub ship_radius: f64,
    pub safety_margin: f64,
    /// Spacing between samples along the leg (days).
    pub sample_step: f64,
}

impl ClearanceChecker {
    pub fn new(ship_radius: f64, safety_margin: f64, sample_step: f64) -> Self {
        Self {
            ship_radius,
            safety_margin,
            sample_step,
        }
    }

    pub fn exclusion_radius(&self, body: &Body) -> f64 {
        body.visual_radius + self.safety_margin + self.ship_radius
    }

    pub fn check(
        &self,
        model: &ElementModel,
        system: &BodySystem,
        leg: &TransferLeg,
    ) -> Result<ClearanceReport, NumericalError> {
        let source = system.body(leg.source);
        let target = system.body(leg.target);
        let source_exclusion = self.exclusion_radius(source);
        let target_exclusion = self.exclusion_radius(target);
        let samples = (leg.duration() / self.sample_step).ceil() as usize + 1;

        let mut report = ClearanceReport {
            min_source_distance: f64::INFINITY,
            min_target_distance: f64::INFINITY,
            source_exclusion,
            target_exclusion,
            worst_time: leg.t_depart,
            samples: samples.max(2),
        };
        let mut worst_margin = f64::INFINITY;

        for t in leg.sample_times(samples) {
            let ship = leg.position_at(&model.kepler, t)?;
            let d_source = distance(&ship, &model.position(source, t)?);
            let d_target = distance(&ship, &model.position(target, t)?);
            report.min_source_distance = report.min_source_distance.min(d_source);
            report.min_target_distance = report.min_target_distance.min(d_target);

            let margin = (d_source - source_exclusion).min(d_target - target_exclusion);
            if margin < worst_margin {
                worst_margin = margin;
                report.worst_time = t;
            }
        }
        Ok(report)
    }

    /// Whether no sample violates either exclusion radius. Numerical failures count as unclear.
    pub fn is_clear(&self, model: &ElementModel, system: &BodySystem, leg: &TransferLeg) -> bool {
        match self.check(model, system, leg) {
            Ok(report) => report.is_clear(),
            Err(err) => {
                log::debug!("clearance sampling failed: {err}");
                false
            }
        }
    }
}
