//! The two bodies a shuttle runs between, built from configuration.

use serde::Serialize;
use shuttle_config::{BodyConfig, PlannerConfig, SolverConfig};
use shuttle_orbits::{Body, ElementModel, KeplerSolver, OrbitalElements};

/// Which end of the shuttle route a body is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyId {
    Source,
    Target,
}

impl BodyId {
    pub fn other(self) -> Self {
        match self {
            BodyId::Source => BodyId::Target,
            BodyId::Target => BodyId::Source,
        }
    }
}

/// Immutable body table and central-body gravitational parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySystem {
    pub mu: f64,
    pub source: Body,
    pub target: Body,
}

impl BodySystem {
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            mu: config.mu_au3_day2,
            source: body_from_config(&config.source),
            target: body_from_config(&config.target),
        }
    }

    pub fn body(&self, id: BodyId) -> &Body {
        match id {
            BodyId::Source => &self.source,
            BodyId::Target => &self.target,
        }
    }
}

/// Convert a `BodyConfig` into the runtime `Body` representation.
pub fn body_from_config(config: &BodyConfig) -> Body {
    let el = &config.elements;
    Body {
        name: config.name.clone(),
        elements: OrbitalElements::from_degrees(
            el.semi_major_axis_au,
            el.eccentricity,
            el.inclination_deg,
            el.ascending_node_deg,
            el.argument_periapsis_deg,
            el.mean_anomaly_deg,
            el.period_days,
            el.epoch_day,
        ),
        visual_radius: config.visual_radius_au,
        parking_radius: config.parking_radius_au,
        parking_period: config.parking_period_days,
    }
}

pub fn model_from_config(solver: &SolverConfig) -> ElementModel {
    ElementModel::new(
        KeplerSolver::new(solver.kepler_tolerance_rad, solver.kepler_max_iterations),
        solver.finite_difference_step_days,
    )
}
