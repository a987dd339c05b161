//! Configuration models and loaders for the Solar Shuttle planner.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level planner configuration. Loaded once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Central-body gravitational parameter (AU³/day²).
    pub mu_au3_day2: f64,
    /// Calendar label of simulated day 0 (`%Y-%m-%dT%H:%M:%S`).
    pub epoch_utc: String,
    /// Simulated day at which the first mission starts parked at the source body.
    pub start_day: f64,
    pub source: BodyConfig,
    pub target: BodyConfig,
    pub clearance: ClearanceConfig,
    pub solver: SolverConfig,
    pub schedule: ScheduleConfig,
}

/// A body the shuttle parks at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    pub elements: ElementsConfig,
    /// Rendered radius of the body; the first term of its exclusion radius.
    pub visual_radius_au: f64,
    /// Radius of the circular holding orbit, also the transfer endpoint offset.
    pub parking_radius_au: f64,
    /// Nominal parking period before it is fitted to the phase duration.
    pub parking_period_days: f64,
}

/// Classical Keplerian elements, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementsConfig {
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    #[serde(default)]
    pub inclination_deg: f64,
    #[serde(default)]
    pub ascending_node_deg: f64,
    #[serde(default)]
    pub argument_periapsis_deg: f64,
    #[serde(default)]
    pub mean_anomaly_deg: f64,
    pub period_days: f64,
    #[serde(default)]
    pub epoch_day: f64,
}

/// Exclusion geometry shared by both bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceConfig {
    pub safety_margin_au: f64,
    pub ship_radius_au: f64,
    /// Spacing of clearance samples along a transfer leg.
    pub sample_step_days: f64,
}

/// Tolerances and iteration caps for every numerical loop in the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub kepler_tolerance_rad: f64,
    pub kepler_max_iterations: usize,
    pub timer_tolerance_days: f64,
    pub timer_max_iterations: usize,
    pub coarse_step_days: f64,
    pub bisection_tolerance_days: f64,
    pub bisection_max_iterations: usize,
    pub finite_difference_step_days: f64,
}

/// Retry budgets and acceptance thresholds used by the schedule generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub window_horizon_days: f64,
    /// How many times the window horizon may be doubled before giving up.
    pub horizon_doublings: u32,
    /// Rejected candidates tolerated per leg before giving up.
    pub candidate_retries: u32,
    pub perturbation_days: f64,
    pub minimum_stay_days: f64,
    /// Δv proxy ceiling: departure velocity deviation from the source body (AU/day).
    pub max_departure_dv_au_per_day: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            mu_au3_day2: 0.000_295_912_208_285_591_1,
            epoch_utc: "2000-01-01T12:00:00".to_string(),
            start_day: 0.0,
            source: BodyConfig::earth(),
            target: BodyConfig::mars(),
            clearance: ClearanceConfig::default(),
            solver: SolverConfig::default(),
            schedule: ScheduleConfig::default(),
        }
    }
}

impl BodyConfig {
    /// Earth with J2000 mean elements.
    pub fn earth() -> Self {
        Self {
            name: "EARTH".to_string(),
            elements: ElementsConfig {
                semi_major_axis_au: 1.0,
                eccentricity: 0.0167,
                inclination_deg: 0.0,
                ascending_node_deg: 0.0,
                argument_periapsis_deg: 102.937,
                mean_anomaly_deg: 357.527,
                period_days: 365.25,
                epoch_day: 0.0,
            },
            visual_radius_au: 0.12,
            parking_radius_au: 0.20,
            parking_period_days: 20.0,
        }
    }

    /// Mars with J2000 mean elements.
    pub fn mars() -> Self {
        Self {
            name: "MARS".to_string(),
            elements: ElementsConfig {
                semi_major_axis_au: 1.524,
                eccentricity: 0.0934,
                inclination_deg: 1.850,
                ascending_node_deg: 49.558,
                argument_periapsis_deg: 286.502,
                mean_anomaly_deg: 19.373,
                period_days: 687.0,
                epoch_day: 0.0,
            },
            visual_radius_au: 0.08,
            parking_radius_au: 0.18,
            parking_period_days: 25.0,
        }
    }

    /// Minimum allowed ship separation from this body.
    pub fn exclusion_radius_au(&self, clearance: &ClearanceConfig) -> f64 {
        self.visual_radius_au + clearance.safety_margin_au + clearance.ship_radius_au
    }
}

impl Default for ClearanceConfig {
    fn default() -> Self {
        Self {
            safety_margin_au: 0.04,
            ship_radius_au: 0.006,
            sample_step_days: 1.0 / 24.0,
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            kepler_tolerance_rad: 1e-10,
            kepler_max_iterations: 50,
            timer_tolerance_days: 1e-6,
            timer_max_iterations: 30,
            coarse_step_days: 1.0,
            bisection_tolerance_days: 1e-6,
            bisection_max_iterations: 100,
            finite_difference_step_days: 1e-3,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            window_horizon_days: 1_400.0,
            horizon_doublings: 3,
            candidate_retries: 16,
            perturbation_days: 1.0,
            minimum_stay_days: 30.0,
            max_departure_dv_au_per_day: 0.01,
        }
    }
}

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {field} {reason}")]
    Invalid { field: String, reason: String },
}

impl PlannerConfig {
    /// Reject values that would make the planner's loops meaningless or its invariants unreachable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("mu_au3_day2", self.mu_au3_day2)?;
        if !self.start_day.is_finite() {
            return Err(invalid("start_day", "must be finite"));
        }
        for body in [&self.source, &self.target] {
            body.validate(&self.clearance)?;
        }
        if self.source.name.eq_ignore_ascii_case(&self.target.name) {
            return Err(invalid("target.name", "must differ from source.name"));
        }

        non_negative("clearance.safety_margin_au", self.clearance.safety_margin_au)?;
        non_negative("clearance.ship_radius_au", self.clearance.ship_radius_au)?;
        positive("clearance.sample_step_days", self.clearance.sample_step_days)?;

        let s = &self.solver;
        positive("solver.kepler_tolerance_rad", s.kepler_tolerance_rad)?;
        positive("solver.timer_tolerance_days", s.timer_tolerance_days)?;
        positive("solver.coarse_step_days", s.coarse_step_days)?;
        positive("solver.bisection_tolerance_days", s.bisection_tolerance_days)?;
        positive("solver.finite_difference_step_days", s.finite_difference_step_days)?;
        for (field, cap) in [
            ("solver.kepler_max_iterations", s.kepler_max_iterations),
            ("solver.timer_max_iterations", s.timer_max_iterations),
            ("solver.bisection_max_iterations", s.bisection_max_iterations),
        ] {
            if cap == 0 {
                return Err(invalid(field, "must be at least 1"));
            }
        }

        let sc = &self.schedule;
        positive("schedule.window_horizon_days", sc.window_horizon_days)?;
        positive("schedule.perturbation_days", sc.perturbation_days)?;
        positive("schedule.minimum_stay_days", sc.minimum_stay_days)?;
        positive(
            "schedule.max_departure_dv_au_per_day",
            sc.max_departure_dv_au_per_day,
        )?;
        if sc.window_horizon_days < s.coarse_step_days {
            return Err(invalid(
                "schedule.window_horizon_days",
                "must cover at least one coarse scan step",
            ));
        }
        Ok(())
    }
}

impl BodyConfig {
    fn validate(&self, clearance: &ClearanceConfig) -> Result<(), ConfigError> {
        let field = |suffix: &str| format!("{}.{}", self.name, suffix);
        let el = &self.elements;
        if !(el.semi_major_axis_au.is_finite() && el.semi_major_axis_au > 0.0) {
            return Err(invalid(&field("semi_major_axis_au"), "must be positive"));
        }
        if !(0.0..1.0).contains(&el.eccentricity) {
            return Err(invalid(&field("eccentricity"), "must lie in [0, 1)"));
        }
        if !(el.period_days.is_finite() && el.period_days > 0.0) {
            return Err(invalid(&field("period_days"), "must be positive"));
        }
        for (name, value) in [
            ("inclination_deg", el.inclination_deg),
            ("ascending_node_deg", el.ascending_node_deg),
            ("argument_periapsis_deg", el.argument_periapsis_deg),
            ("mean_anomaly_deg", el.mean_anomaly_deg),
            ("epoch_day", el.epoch_day),
        ] {
            if !value.is_finite() {
                return Err(invalid(&field(name), "must be finite"));
            }
        }
        if !(self.visual_radius_au.is_finite() && self.visual_radius_au >= 0.0) {
            return Err(invalid(&field("visual_radius_au"), "must be non-negative"));
        }
        if !(self.parking_period_days.is_finite() && self.parking_period_days > 0.0) {
            return Err(invalid(&field("parking_period_days"), "must be positive"));
        }
        let exclusion = self.exclusion_radius_au(clearance);
        if !(self.parking_radius_au > exclusion) {
            return Err(invalid(
                &field("parking_radius_au"),
                &format!("must exceed the exclusion radius {exclusion:.4} AU"),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be non-negative"))
    }
}

/// Load and validate a planner configuration from YAML, or TOML when the extension is `.toml`.
pub fn load_planner_config<P: AsRef<Path>>(path: P) -> Result<PlannerConfig, ConfigError> {
    let path = path.as_ref();
    let config: PlannerConfig = if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        let reader = File::open(path)?;
        serde_yaml::from_reader(reader)?
    };
    config.validate()?;
    Ok(config)
}
