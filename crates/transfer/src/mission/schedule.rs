//! Mission schedules and the generator that plans them.

use serde::Serialize;
use shuttle_config::PlannerConfig;
use shuttle_orbits::{ElementModel, NumericalError, fit_parking_period};

use super::clearance::{ClearanceChecker, ClearanceReport};
use super::leg::{TransferError, TransferLeg};
use super::sampler::Phase;
use super::timer::TransferTimer;
use super::window::{LaunchWindow, LaunchWindowSearch, WindowError};
use super::{PlanningError, SchedulingError};
use crate::bodies::{BodyId, BodySystem, model_from_config};

/// Samples used when verifying that a leg's heading only advances.
const PROGRADE_SAMPLES: usize = 512;

/// Key time points of one mission, as exposed to timeline consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleTimes {
    pub mission_index: usize,
    pub t_start: f64,
    pub t_launch: f64,
    pub t_arrival_outbound: f64,
    pub t_depart_return: f64,
    pub t_arrival_return: f64,
}

/// One full round trip. Immutable once generated.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionSchedule {
    pub mission_index: usize,
    pub t_start: f64,
    pub t_launch: f64,
    pub t_arrival_outbound: f64,
    pub t_depart_return: f64,
    pub t_arrival_return: f64,
    pub outbound: TransferLeg,
    pub inbound: TransferLeg,
    /// Fitted so the ship is back on the source outer point at `t_launch`.
    pub source_parking_period: f64,
    /// Fitted so the ship is back on the target outer point at `t_depart_return`.
    pub target_parking_period: f64,
}

impl MissionSchedule {
    pub fn times(&self) -> ScheduleTimes {
        ScheduleTimes {
            mission_index: self.mission_index,
            t_start: self.t_start,
            t_launch: self.t_launch,
            t_arrival_outbound: self.t_arrival_outbound,
            t_depart_return: self.t_depart_return,
            t_arrival_return: self.t_arrival_return,
        }
    }

    /// Whether `t` falls in `[t_start, t_arrival_return)`.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.t_start && t < self.t_arrival_return
    }

    pub fn phase_at(&self, t: f64) -> Option<Phase> {
        if !self.contains(t) {
            None
        } else if t < self.t_launch {
            Some(Phase::SourceParking)
        } else if t < self.t_arrival_outbound {
            Some(Phase::OutboundTransfer)
        } else if t < self.t_depart_return {
            Some(Phase::TargetParking)
        } else {
            Some(Phase::ReturnTransfer)
        }
    }
}

/// Budgets and thresholds that drive candidate acceptance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorSettings {
    pub start_day: f64,
    pub window_horizon: f64,
    pub horizon_doublings: u32,
    pub candidate_retries: u32,
    pub perturbation: f64,
    pub minimum_stay: f64,
    pub max_departure_dv: f64,
}

impl GeneratorSettings {
    pub fn from_config(config: &PlannerConfig) -> Self {
        let s = &config.schedule;
        Self {
            start_day: config.start_day,
            window_horizon: s.window_horizon_days,
            horizon_doublings: s.horizon_doublings,
            candidate_retries: s.candidate_retries,
            perturbation: s.perturbation_days,
            minimum_stay: s.minimum_stay_days,
            max_departure_dv: s.max_departure_dv_au_per_day,
        }
    }
}

/// Why a phase-matched candidate was not turned into a leg.
#[derive(Debug, thiserror::Error)]
enum Rejection {
    #[error("departure at t = {t_launch:.3} leaves no parking stay after t = {parked_since:.3}")]
    NoStay { t_launch: f64, parked_since: f64 },
    #[error("degenerate geometry: {0}")]
    Geometry(TransferError),
    #[error("numerical failure: {0}")]
    Numerical(NumericalError),
    #[error("heading decreases along the leg")]
    Retrograde,
    #[error(
        "clearance violated near t = {:.3} (source {:.4}/{:.4} AU, target {:.4}/{:.4} AU)",
        .0.worst_time,
        .0.min_source_distance,
        .0.source_exclusion,
        .0.min_target_distance,
        .0.target_exclusion
    )]
    Clearance(ClearanceReport),
    #[error("departure Δv proxy {delta_v:.5} exceeds {limit:.5} AU/day")]
    DeltaV { delta_v: f64, limit: f64 },
}

/// Plans successive round trips: source parking, outbound, target parking, return.
#[derive(Debug, Clone)]
pub struct MissionScheduleGenerator {
    system: BodySystem,
    model: ElementModel,
    search: LaunchWindowSearch,
    clearance: ClearanceChecker,
    settings: GeneratorSettings,
}

impl MissionScheduleGenerator {
    pub fn new(
        system: BodySystem,
        model: ElementModel,
        search: LaunchWindowSearch,
        clearance: ClearanceChecker,
        settings: GeneratorSettings,
    ) -> Self {
        Self {
            system,
            model,
            search,
            clearance,
            settings,
        }
    }

    /// Validate `config` and assemble every planner component from it.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, PlanningError> {
        config.validate()?;
        let solver = &config.solver;
        let timer = TransferTimer::new(
            config.mu_au3_day2,
            solver.timer_tolerance_days,
            solver.timer_max_iterations,
        );
        let search = LaunchWindowSearch::new(
            timer,
            solver.coarse_step_days,
            solver.bisection_tolerance_days,
            solver.bisection_max_iterations,
        );
        let clearance = ClearanceChecker::new(
            config.clearance.ship_radius_au,
            config.clearance.safety_margin_au,
            config.clearance.sample_step_days,
        );
        Ok(Self::new(
            BodySystem::from_config(config),
            model_from_config(solver),
            search,
            clearance,
            GeneratorSettings::from_config(config),
        ))
    }

    pub fn system(&self) -> &BodySystem {
        &self.system
    }

    pub fn model(&self) -> &ElementModel {
        &self.model
    }

    pub fn search(&self) -> &LaunchWindowSearch {
        &self.search
    }

    pub fn clearance(&self) -> &ClearanceChecker {
        &self.clearance
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// The first mission, starting parked at the source on `start_day`.
    pub fn first(&self) -> Result<MissionSchedule, PlanningError> {
        self.generate(0, self.settings.start_day)
    }

    /// The mission that starts when `previous` lands back at the source.
    pub fn next_after(&self, previous: &MissionSchedule) -> Result<MissionSchedule, PlanningError> {
        self.generate(previous.mission_index + 1, previous.t_arrival_return)
    }

    /// Plan a full round trip starting parked at the source at `t_start`.
    pub fn generate(
        &self,
        mission_index: usize,
        t_start: f64,
    ) -> Result<MissionSchedule, PlanningError> {
        let outbound = self.plan_leg(mission_index, BodyId::Source, t_start, t_start)?;
        let inbound = self.plan_leg(
            mission_index,
            BodyId::Target,
            outbound.t_arrival,
            outbound.t_arrival + self.settings.minimum_stay,
        )?;

        let schedule = MissionSchedule {
            mission_index,
            t_start,
            t_launch: outbound.t_depart,
            t_arrival_outbound: outbound.t_arrival,
            t_depart_return: inbound.t_depart,
            t_arrival_return: inbound.t_arrival,
            source_parking_period: fit_parking_period(
                outbound.t_depart - t_start,
                self.system.source.parking_period,
            ),
            target_parking_period: fit_parking_period(
                inbound.t_depart - outbound.t_arrival,
                self.system.target.parking_period,
            ),
            outbound,
            inbound,
        };
        log::info!(
            "mission {} planned: start {:.3}, launch {:.3}, arrive {:.3}, depart {:.3}, return {:.3}",
            schedule.mission_index,
            schedule.t_start,
            schedule.t_launch,
            schedule.t_arrival_outbound,
            schedule.t_depart_return,
            schedule.t_arrival_return
        );
        Ok(schedule)
    }

    /// Find the first acceptable leg departing `source` no earlier than `earliest`.
    ///
    /// The ship has been parked at `source` since `parked_since`; a departure at
    /// that instant is rejected so every parking phase has non-zero length.
    pub fn plan_leg(
        &self,
        mission_index: usize,
        source: BodyId,
        parked_since: f64,
        earliest: f64,
    ) -> Result<TransferLeg, SchedulingError> {
        let mut candidate_start = earliest;
        for attempt in 0..=self.settings.candidate_retries {
            let window = self.find_window(mission_index, source, candidate_start)?;
            match self.accept(source, parked_since, &window) {
                Ok(leg) => return Ok(leg),
                Err(reason) => {
                    log::debug!(
                        "mission {mission_index}: candidate {attempt} at t = {:.3} rejected: {reason}",
                        window.t_launch
                    );
                    candidate_start = window.t_launch + self.settings.perturbation;
                }
            }
        }

        let (source_name, target_name) = self.names(source);
        log::warn!(
            "mission {mission_index}: {source_name} -> {target_name} candidate budget exhausted"
        );
        Err(SchedulingError::CandidatesExhausted {
            mission_index,
            source_name,
            target_name,
            earliest,
            attempts: self.settings.candidate_retries + 1,
        })
    }

    /// Window search that doubles its horizon on every miss, up to the configured count.
    fn find_window(
        &self,
        mission_index: usize,
        source: BodyId,
        earliest: f64,
    ) -> Result<LaunchWindow, SchedulingError> {
        let from = self.system.body(source);
        let to = self.system.body(source.other());
        let mut horizon = self.settings.window_horizon;
        for doubling in 0..=self.settings.horizon_doublings {
            match self
                .search
                .find_next_window(&self.model, from, to, earliest, horizon)
            {
                Ok(window) => return Ok(window),
                Err(err @ WindowError::NotFound { .. }) => {
                    if doubling < self.settings.horizon_doublings {
                        log::info!("{err}; doubling horizon to {:.1} days", 2.0 * horizon);
                        horizon *= 2.0;
                    }
                }
                Err(err) => {
                    log::warn!("{err}");
                    break;
                }
            }
        }

        let (source_name, target_name) = self.names(source);
        Err(SchedulingError::WindowSearchExhausted {
            mission_index,
            source_name,
            target_name,
            earliest,
            horizon,
            doublings: self.settings.horizon_doublings,
        })
    }

    fn accept(
        &self,
        source: BodyId,
        parked_since: f64,
        window: &LaunchWindow,
    ) -> Result<TransferLeg, Rejection> {
        if window.t_launch <= parked_since {
            return Err(Rejection::NoStay {
                t_launch: window.t_launch,
                parked_since,
            });
        }
        let leg = TransferLeg::half_ellipse(&self.model, &self.system, source, &window.timing)
            .map_err(Rejection::Geometry)?;

        if !leg
            .is_prograde(&self.model.kepler, PROGRADE_SAMPLES)
            .map_err(Rejection::Numerical)?
        {
            return Err(Rejection::Retrograde);
        }

        let body_velocity = self
            .model
            .velocity(self.system.body(source), leg.t_depart)
            .map_err(Rejection::Numerical)?;
        let delta_v = leg.departure_delta_v(&body_velocity);
        if delta_v > self.settings.max_departure_dv {
            return Err(Rejection::DeltaV {
                delta_v,
                limit: self.settings.max_departure_dv,
            });
        }

        let report = self
            .clearance
            .check(&self.model, &self.system, &leg)
            .map_err(Rejection::Numerical)?;
        if !report.is_clear() {
            return Err(Rejection::Clearance(report));
        }
        Ok(leg)
    }

    fn names(&self, source: BodyId) -> (String, String) {
        (
            self.system.body(source).name.clone(),
            self.system.body(source.other()).name.clone(),
        )
    }
}
