//! Mission planning: launch windows, half-ellipse legs, and the append-only schedule timeline.

pub mod clearance;
pub mod leg;
pub mod sampler;
pub mod schedule;
pub mod timeline;
pub mod timer;
pub mod window;

use shuttle_config::ConfigError;
use shuttle_orbits::NumericalError;
use thiserror::Error;

/// Every retry budget for one leg ran out.
#[derive(Debug, Error)]
pub enum SchedulingError {
    #[error(
        "mission {mission_index}: no {source_name} -> {target_name} launch window within {horizon:.1} days of t = {earliest:.3} after {doublings} horizon doublings"
    )]
    WindowSearchExhausted {
        mission_index: usize,
        source_name: String,
        target_name: String,
        earliest: f64,
        horizon: f64,
        doublings: u32,
    },
    #[error(
        "mission {mission_index}: all {attempts} {source_name} -> {target_name} candidates after t = {earliest:.3} were rejected"
    )]
    CandidatesExhausted {
        mission_index: usize,
        source_name: String,
        target_name: String,
        earliest: f64,
        attempts: u32,
    },
}

/// Top-level planning error.
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("mission planning exhausted: {0}")]
    Scheduling(#[from] SchedulingError),
    #[error("numerical failure: {0}")]
    Numerical(#[from] NumericalError),
    #[error("time {t} precedes the timeline start {start}")]
    BeforeTimeline { t: f64, start: f64 },
    #[error("time {t} lies outside mission {mission_index}")]
    OutsideSchedule { t: f64, mission_index: usize },
    #[error("non-finite query time {0}")]
    NonFiniteTime(f64),
}
